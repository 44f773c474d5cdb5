//! chat-digest - periodic natural-language digest of a Telegram group chat.
//!
//! A run authenticates with a Telegram user session, pulls the messages posted
//! since local midnight N days ago, renders them into a chronological
//! transcript, asks Gemini for a short digest and delivers the result.
//!
//! # Architecture
//!
//! - `pipeline` holds the window selector, identity resolver, transcript
//!   renderer, summarizer and the orchestrator that chains them
//! - `core` holds the data model, configuration and the `ChatSource` seam
//! - `ai` talks to the Gemini `generateContent` API via reqwest
//! - `telegram` holds session stores and (with the `telegram` feature) the
//!   grammers-backed chat source
//!
//! # Example
//!
//! ```no_run
//! use chat_digest::ai::GeminiClient;
//! use chat_digest::core::config::AppConfig;
//! use chat_digest::pipeline::summarize::Summarizer;
//! use chat_digest::pipeline::transcript::Transcript;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     chat_digest::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let summarizer = Summarizer::new(GeminiClient::from_config(&config), config.language);
//!
//!     // Even an empty transcript produces a digest.
//!     let digest = summarizer.summarize(&Transcript::default()).await?;
//!     println!("{digest}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod telegram;

pub use ai::estimate_tokens;
pub use errors::DigestError;

/// Configure structured JSON logging on stderr.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Stdout stays free for
/// the digest itself. Calling this more than once is harmless.
///
/// # Example
///
/// ```
/// chat_digest::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
