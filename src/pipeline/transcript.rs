use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::core::locale::Locale;
use crate::core::models::ResolvedMessage;

/// Chronologically ordered transcript lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-01T09:00:00.000Z`.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `[<timestamp>] [<name>]: <body>`
#[must_use]
pub fn render_line(message: &ResolvedMessage, locale: Locale) -> String {
    let body = message
        .body
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| locale.empty_body());

    format!(
        "[{}] [{}]: {}",
        format_timestamp(message.timestamp),
        message.display_name,
        body
    )
}

/// Render newest-first messages as an oldest-first transcript.
#[must_use]
pub fn render(newest_first: &[ResolvedMessage], locale: Locale) -> Transcript {
    Transcript {
        lines: newest_first
            .iter()
            .rev()
            .map(|msg| render_line(msg, locale))
            .collect(),
    }
}
