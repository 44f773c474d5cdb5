use dialoguer::{Input, Password};

use crate::core::locale::Locale;
use crate::errors::DigestError;

/// Supplies the credentials of an interactive login.
pub trait LoginPrompter {
    /// # Errors
    fn phone(&self) -> Result<String, DigestError>;

    /// # Errors
    fn code(&self) -> Result<String, DigestError>;

    /// # Errors
    fn password(&self, hint: Option<&str>) -> Result<String, DigestError>;
}

/// Terminal prompts via `dialoguer`.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    locale: Locale,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

fn prompt_error(e: dialoguer::Error) -> DigestError {
    DigestError::AuthError(format!("Interactive prompt failed: {e}"))
}

impl LoginPrompter for TerminalPrompter {
    fn phone(&self) -> Result<String, DigestError> {
        Input::<String>::new()
            .with_prompt(self.locale.phone_prompt())
            .interact_text()
            .map(|s| s.trim().to_string())
            .map_err(prompt_error)
    }

    fn code(&self) -> Result<String, DigestError> {
        Input::<String>::new()
            .with_prompt(self.locale.code_prompt())
            .interact_text()
            .map(|s| s.trim().to_string())
            .map_err(prompt_error)
    }

    fn password(&self, hint: Option<&str>) -> Result<String, DigestError> {
        let prompt = match hint {
            Some(h) if !h.is_empty() => format!("{} ({h})", self.locale.password_prompt()),
            _ => self.locale.password_prompt().to_string(),
        };
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }
}
