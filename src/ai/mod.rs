//! All generative-model functionality

pub mod client;
pub mod prompt;

// Re-export main types for convenience
pub use client::{GeminiClient, Generator, estimate_tokens};
