//! Telegram user-session plumbing

pub mod session;

#[cfg(feature = "telegram")]
pub mod client;
#[cfg(feature = "telegram")]
pub mod login;

pub use session::{EnvSessionStore, FileSessionStore, SessionStore, select_store};

#[cfg(feature = "telegram")]
pub use client::{TelegramChat, TelegramClient};
