//! Telegram client module
//!
//! MTProto user session implementing the chat source and delivery sink.

use async_trait::async_trait;
use futures::stream;
use grammers_client::types::{Chat, Message as TgMessage};
use grammers_client::{Client, Config, InitParams, SignInError};
use grammers_session::{PackedChat, PackedType, Session};
use grammers_tl_types as tl;
use tracing::{error, info, warn};

use super::login::LoginPrompter;
use super::session::{SessionStore, encode_session};
use crate::core::config::AppConfig;
use crate::core::models::{AuthorKind, Destination, Message};
use crate::core::source::{ChatSource, MessageStream};
use crate::errors::DigestError;
use crate::pipeline::deliver::DeliverySink;

/// Chat identity handed around by the pipeline.
pub type TelegramChat = PackedChat;

/// Connected Telegram session.
///
/// The session is written back to its store when the client is dropped, on
/// success and failure paths alike.
pub struct TelegramClient {
    client: Client,
    store: Box<dyn SessionStore>,
}

impl TelegramClient {
    /// Connect using whatever session the store holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored session is corrupt or the connection fails.
    pub async fn connect(
        config: &AppConfig,
        store: Box<dyn SessionStore>,
    ) -> Result<Self, DigestError> {
        let session = match store.load()? {
            Some(bytes) => Session::load(&bytes).map_err(|e| {
                DigestError::SessionError(format!("{}: {e}", store.describe()))
            })?,
            None => Session::new(),
        };

        let client = Client::connect(Config {
            session,
            api_id: config.tg_api_id,
            api_hash: config.tg_api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| DigestError::AuthError(format!("Failed to connect: {e}")))?;

        info!("Connected to Telegram");
        Ok(Self { client, store })
    }

    /// Log in interactively unless the restored session is already authorized.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if any login step fails.
    pub async fn ensure_authorized(&self, prompter: &dyn LoginPrompter) -> Result<(), DigestError> {
        let authorized = self
            .client
            .is_authorized()
            .await
            .map_err(|e| DigestError::AuthError(format!("Authorization check failed: {e}")))?;
        if authorized {
            info!("Restored authorized session");
            return Ok(());
        }

        info!("No authorized session, starting interactive login");
        let phone = prompter.phone()?;
        let token = self
            .client
            .request_login_code(&phone)
            .await
            .map_err(|e| DigestError::AuthError(format!("Failed to request login code: {e}")))?;
        let code = prompter.code()?;

        match self.client.sign_in(&token, &code).await {
            Ok(_) => {}
            Err(SignInError::PasswordRequired(password_token)) => {
                let password = prompter.password(password_token.hint())?;
                self.client
                    .check_password(password_token, password.trim())
                    .await
                    .map_err(|e| DigestError::AuthError(format!("2FA check failed: {e}")))?;
            }
            Err(e) => {
                error!("Sign-in failed: {}", e);
                return Err(DigestError::AuthError(format!("Sign-in failed: {e}")));
            }
        }

        info!("Signed in to Telegram");
        self.persist()
    }

    /// Write the current session to its store.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store rejects the write.
    pub fn persist(&self) -> Result<(), DigestError> {
        self.store.save(&self.client.session().save())
    }

    /// Base64 session token suitable for `TG_SESSION`.
    #[must_use]
    pub fn export_session(&self) -> String {
        encode_session(&self.client.session().save())
    }
}

impl Drop for TelegramClient {
    fn drop(&mut self) {
        if let Err(e) = self.persist() {
            warn!("Failed to persist Telegram session: {}", e);
        }
    }
}

/// Pack the raw chat returned by an invite check.
fn pack_raw_chat(chat: &tl::enums::Chat) -> Result<PackedChat, DigestError> {
    match chat {
        tl::enums::Chat::Chat(c) => Ok(PackedChat {
            ty: PackedType::Chat,
            id: c.id,
            access_hash: None,
        }),
        tl::enums::Chat::Channel(c) => {
            let ty = if c.broadcast {
                PackedType::Broadcast
            } else if c.gigagroup {
                PackedType::Gigagroup
            } else {
                PackedType::Megagroup
            };
            Ok(PackedChat {
                ty,
                id: c.id,
                access_hash: c.access_hash,
            })
        }
        tl::enums::Chat::Empty(_)
        | tl::enums::Chat::Forbidden(_)
        | tl::enums::Chat::ChannelForbidden(_) => Err(DigestError::RetrievalError(
            "Invited chat is not accessible".to_string(),
        )),
    }
}

fn to_message(message: &TgMessage) -> Message<Option<Chat>> {
    let text = message.text();
    Message::new(
        message.date(),
        message.sender(),
        (!text.is_empty()).then(|| text.to_string()),
    )
}

#[async_trait]
impl ChatSource for TelegramClient {
    type Chat = TelegramChat;
    type Author = Option<Chat>;

    async fn resolve_chat(&self, handle: &str) -> Result<Self::Chat, DigestError> {
        let invite = self
            .client
            .invoke(&tl::functions::messages::CheckChatInvite {
                hash: handle.to_string(),
            })
            .await
            .map_err(|e| DigestError::RetrievalError(format!("Failed to check invite: {e}")))?;

        let packed = match invite {
            tl::enums::ChatInvite::Already(already) => pack_raw_chat(&already.chat)?,
            tl::enums::ChatInvite::Peek(peek) => pack_raw_chat(&peek.chat)?,
            tl::enums::ChatInvite::Invite(_) => {
                return Err(DigestError::RetrievalError(
                    "This account is not a member of the invited chat".to_string(),
                ));
            }
        };

        info!("Resolved invite to chat {}", packed.id);
        Ok(packed)
    }

    fn messages<'a>(&'a self, chat: &'a Self::Chat) -> MessageStream<'a, Self::Author> {
        let iter = self.client.iter_messages(chat.clone());
        Box::pin(stream::try_unfold(iter, |mut iter| async move {
            match iter.next().await {
                Ok(Some(message)) => Ok(Some((to_message(&message), iter))),
                Ok(None) => Ok(None),
                Err(e) => Err(DigestError::RetrievalError(format!(
                    "Failed to fetch history: {e}"
                ))),
            }
        }))
    }

    async fn resolve_author(&self, author: &Self::Author) -> Result<AuthorKind, DigestError> {
        Ok(match author {
            Some(Chat::User(user)) => AuthorKind::Individual {
                given: Some(user.first_name().to_string()),
                family: user.last_name().map(str::to_string),
            },
            Some(Chat::Group(group)) => AuthorKind::Group {
                title: group.title().to_string(),
            },
            Some(Chat::Channel(channel)) => AuthorKind::Group {
                title: channel.title().to_string(),
            },
            None => AuthorKind::Unrecognized,
        })
    }
}

#[async_trait]
impl DeliverySink<TelegramChat> for TelegramClient {
    async fn deliver(
        &self,
        destination: Destination,
        chat: &TelegramChat,
        text: &str,
    ) -> Result<(), DigestError> {
        let target = match destination {
            Destination::Chat => chat.clone(),
            Destination::Saved => self
                .client
                .get_me()
                .await
                .map_err(|e| DigestError::DeliveryError(format!("Failed to get own user: {e}")))?
                .pack(),
            Destination::Stdout => {
                return Err(DigestError::DeliveryError(
                    "Telegram sink cannot write to stdout".to_string(),
                ));
            }
        };

        self.client
            .send_message(target, text)
            .await
            .map_err(|e| DigestError::DeliveryError(format!("Failed to send digest: {e}")))?;
        info!("Digest sent to {:?}", destination);
        Ok(())
    }
}
