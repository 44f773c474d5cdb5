//! Collaborator interface for the messaging network.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::models::{AuthorKind, Message};
use crate::errors::DigestError;

/// Stream of messages, newest first.
pub type MessageStream<'a, A> = BoxStream<'a, Result<Message<A>, DigestError>>;

/// A chat network the digest reads from.
///
/// Implementations must yield messages in strictly reverse-chronological
/// order and should fetch lazily, so that a consumer that stops pulling
/// causes no further network work.
#[async_trait]
pub trait ChatSource: Send + Sync {
    /// Resolved chat identity.
    type Chat: Send + Sync;
    /// Opaque reference to whoever sent a message.
    type Author: Send + Sync;

    /// Resolve an invite hash or handle into a chat.
    async fn resolve_chat(&self, handle: &str) -> Result<Self::Chat, DigestError>;

    /// Lazily stream the chat history, newest first.
    fn messages<'a>(&'a self, chat: &'a Self::Chat) -> MessageStream<'a, Self::Author>;

    /// Look up what kind of sender an author reference points to.
    async fn resolve_author(&self, author: &Self::Author) -> Result<AuthorKind, DigestError>;
}
