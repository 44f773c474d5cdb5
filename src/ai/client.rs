//! Gemini API client module
//!
//! Encapsulates the text-generation call used to turn a transcript into a digest.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::errors::DigestError;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Text in, text out.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Model identifier the generator sends requests to.
    fn model(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers without text.
    async fn generate(&self, prompt: &str) -> Result<String, DigestError>;
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model_name: String,
    api_base: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: String, model_name: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model_name,
            api_base,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.google_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_api_base.clone(),
        )
    }

    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn endpoint(&self) -> Result<Url, DigestError> {
        let base = self.api_base.trim_end_matches('/');
        Url::parse(&format!(
            "{base}/v1beta/models/{}:generateContent",
            self.model_name
        ))
        .map_err(|e| DigestError::ConfigError(format!("GEMINI_API_BASE: {e}")))
    }
}

#[async_trait]
impl Generator for GeminiClient {
    fn model(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<String, DigestError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Generating digest with model {} ({} chars in prompt)",
            self.model_name,
            prompt.chars().count()
        );

        let request_body = build_generate_request(prompt);

        let response = self
            .http
            .post(self.endpoint()?)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(DigestError::GenerationError(format!(
                "Gemini API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            DigestError::GenerationError(format!("Failed to parse Gemini response: {e}"))
        })?;

        if let Some(reason) = block_reason(&response_json) {
            warn!("Gemini blocked the prompt: {}", reason);
            return Err(DigestError::GenerationError(format!(
                "Prompt blocked by Gemini: {reason}"
            )));
        }

        extract_response_text(&response_json)
            .ok_or_else(|| DigestError::GenerationError("No text in response".to_string()))
    }
}

/// Build the `generateContent` request body for a single-turn text prompt.
pub(crate) fn build_generate_request(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    })
}

/// Concatenate the text parts of the first candidate, skipping thought parts.
pub(crate) fn extract_response_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let collected: String = parts
        .iter()
        .filter(|p| !p.get("thought").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if collected.trim().is_empty() {
        None
    } else {
        Some(collected)
    }
}

fn block_reason(response: &Value) -> Option<String> {
    response
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(Value::as_str)
        .map(std::string::ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generate_request_wraps_prompt_as_single_user_turn() {
        let body = build_generate_request("hello");
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_extract_response_text_joins_parts_and_skips_thoughts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "1. First" },
                        { "text": "\n2. Second" }
                    ]
                },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            extract_response_text(&response).as_deref(),
            Some("1. First\n2. Second")
        );
    }

    #[test]
    fn test_extract_response_text_none_without_usable_text() {
        assert!(extract_response_text(&json!({})).is_none());
        assert!(extract_response_text(&json!({ "candidates": [] })).is_none());
        let blank = json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] });
        assert!(extract_response_text(&blank).is_none());
    }

    #[test]
    fn test_block_reason_is_reported() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(block_reason(&response).as_deref(), Some("SAFETY"));
        assert!(block_reason(&json!({ "candidates": [] })).is_none());
    }

    #[test]
    fn test_endpoint_uses_model_and_trims_base() {
        let client = GeminiClient::new(
            "key".to_string(),
            "gemini-3-flash-preview".to_string(),
            "https://generativelanguage.googleapis.com/".to_string(),
        );
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(client.model(), "gemini-3-flash-preview");
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        let client = GeminiClient::new("key".into(), "m".into(), "not a url".into());
        assert!(matches!(
            client.endpoint(),
            Err(DigestError::ConfigError(_))
        ));
    }
}
