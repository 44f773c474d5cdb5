use futures::future::join_all;
use tracing::warn;

use crate::core::locale::Locale;
use crate::core::models::{AuthorKind, Message, ResolvedMessage};
use crate::core::source::ChatSource;

/// Turn an author kind into the name shown in the transcript.
///
/// Individuals render as "given family" with empty parts dropped, groups and
/// channels by their title. Whatever ends up empty falls back to the
/// locale's unknown-author sentinel.
#[must_use]
pub fn display_name(kind: &AuthorKind, locale: Locale) -> String {
    let name = match kind {
        AuthorKind::Individual { given, family } => [given.as_deref(), family.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        AuthorKind::Group { title } => title.clone(),
        AuthorKind::Unrecognized => String::new(),
    };

    if name.trim().is_empty() {
        locale.unknown_author().to_string()
    } else {
        name
    }
}

/// Resolve a single author reference. Lookup failures degrade to the
/// unknown-author sentinel and never abort the run.
pub async fn resolve_author<S>(source: &S, author: &S::Author, locale: Locale) -> String
where
    S: ChatSource + ?Sized,
{
    match source.resolve_author(author).await {
        Ok(kind) => display_name(&kind, locale),
        Err(e) => {
            warn!("Failed to resolve message author: {}", e);
            locale.unknown_author().to_string()
        }
    }
}

/// Resolve every message's author concurrently.
///
/// The output keeps the input order; each author is looked up on its own,
/// even when the same sender appears many times.
pub async fn resolve_messages<S>(
    source: &S,
    messages: Vec<Message<S::Author>>,
    locale: Locale,
) -> Vec<ResolvedMessage>
where
    S: ChatSource + ?Sized,
{
    let lookups = messages.into_iter().map(|msg| async move {
        let display_name = resolve_author(source, &msg.author, locale).await;
        ResolvedMessage {
            timestamp: msg.timestamp,
            display_name,
            body: msg.body,
        }
    });

    join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual(given: Option<&str>, family: Option<&str>) -> AuthorKind {
        AuthorKind::Individual {
            given: given.map(str::to_string),
            family: family.map(str::to_string),
        }
    }

    #[test]
    fn test_full_name_joined_with_single_space() {
        let kind = AuthorKind::individual("Ivan", "Petrenko");
        assert_eq!(display_name(&kind, Locale::En), "Ivan Petrenko");
    }

    #[test]
    fn test_single_name_part_has_no_separator() {
        assert_eq!(
            display_name(&individual(Some("Olena"), Some("")), Locale::En),
            "Olena"
        );
        assert_eq!(
            display_name(&individual(None, Some("Shevchenko")), Locale::En),
            "Shevchenko"
        );
    }

    #[test]
    fn test_group_uses_title_verbatim() {
        let kind = AuthorKind::group("  Kyiv Rust Meetup ");
        assert_eq!(display_name(&kind, Locale::En), "  Kyiv Rust Meetup ");
    }

    #[test]
    fn test_fallbacks_to_unknown() {
        assert_eq!(display_name(&individual(None, None), Locale::En), "Unknown");
        assert_eq!(
            display_name(&individual(Some(""), Some(" ")), Locale::En),
            "Unknown"
        );
        assert_eq!(display_name(&AuthorKind::group(""), Locale::En), "Unknown");
        assert_eq!(display_name(&AuthorKind::Unrecognized, Locale::En), "Unknown");
        assert_eq!(
            display_name(&AuthorKind::Unrecognized, Locale::Uk),
            Locale::Uk.unknown_author()
        );
    }
}
