use std::str::FromStr;

use crate::errors::DigestError;

/// Language of the digest and of every user-facing fixed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Uk,
    En,
}

impl Locale {
    /// Sentinel display name for authors that cannot be resolved.
    #[must_use]
    pub fn unknown_author(self) -> &'static str {
        match self {
            Locale::Uk => "Невідомий",
            Locale::En => "Unknown",
        }
    }

    /// Placeholder for messages without text (media, stickers, service messages).
    #[must_use]
    pub fn empty_body(self) -> &'static str {
        match self {
            Locale::Uk => "<Медіа або порожньо>",
            Locale::En => "<Media or empty>",
        }
    }

    #[must_use]
    pub fn phone_prompt(self) -> &'static str {
        match self {
            Locale::Uk => "Введіть номер телефону (+380...)",
            Locale::En => "Enter your phone number (+380...)",
        }
    }

    #[must_use]
    pub fn code_prompt(self) -> &'static str {
        match self {
            Locale::Uk => "Введіть код підтвердження",
            Locale::En => "Enter the verification code",
        }
    }

    #[must_use]
    pub fn password_prompt(self) -> &'static str {
        match self {
            Locale::Uk => "Введіть 2FA пароль",
            Locale::En => "Enter your 2FA password",
        }
    }
}

impl FromStr for Locale {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uk" | "ua" | "uk-ua" => Ok(Locale::Uk),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(DigestError::ConfigError(format!(
                "DIGEST_LANGUAGE: unsupported language '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!("uk".parse::<Locale>().unwrap(), Locale::Uk);
        assert_eq!("UA".parse::<Locale>().unwrap(), Locale::Uk);
        assert_eq!(" en-GB ".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_fixed_strings_are_never_empty() {
        for locale in [Locale::Uk, Locale::En] {
            assert!(!locale.unknown_author().is_empty());
            assert!(!locale.empty_body().is_empty());
        }
        assert_eq!(Locale::En.unknown_author(), "Unknown");
        assert_eq!(Locale::En.empty_body(), "<Media or empty>");
    }
}
