use tracing::info;

use super::transcript::Transcript;
use crate::ai::prompt::{PROMPT_VERSION, build_prompt};
use crate::ai::{Generator, estimate_tokens};
use crate::core::locale::Locale;
use crate::errors::DigestError;

/// Sends a transcript plus the fixed instructions to a [`Generator`].
pub struct Summarizer<G> {
    generator: G,
    locale: Locale,
}

impl<G: Generator> Summarizer<G> {
    pub fn new(generator: G, locale: Locale) -> Self {
        Self { generator, locale }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate the digest for `transcript`.
    ///
    /// An empty transcript is still sent. The model's text is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the call fails or yields only whitespace.
    pub async fn summarize(&self, transcript: &Transcript) -> Result<String, DigestError> {
        let prompt = build_prompt(self.locale, &transcript.to_string());

        info!(
            "Summarizing {} transcript lines with {} (prompt v{}, ~{} tokens)",
            transcript.len(),
            self.generator.model(),
            PROMPT_VERSION,
            estimate_tokens(&prompt)
        );

        let text = self.generator.generate(&prompt).await.map_err(|e| match e {
            DigestError::GenerationError(_) => e,
            other => DigestError::GenerationError(other.to_string()),
        })?;

        if text.trim().is_empty() {
            return Err(DigestError::GenerationError(
                "Model returned an empty digest".to_string(),
            ));
        }

        Ok(text)
    }
}
