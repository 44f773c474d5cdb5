use chrono::{DateTime, Utc};
use clap::ValueEnum;

/// A chat message as produced by a [`ChatSource`](crate::core::source::ChatSource).
///
/// `A` is the source's opaque author reference. Messages are created by the
/// source and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<A> {
    pub timestamp: DateTime<Utc>,
    pub author: A,
    pub body: Option<String>,
}

impl<A> Message<A> {
    pub fn new(timestamp: DateTime<Utc>, author: A, body: Option<String>) -> Self {
        Self {
            timestamp,
            author,
            body,
        }
    }
}

/// What an author reference turned out to be once looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorKind {
    /// A person's account.
    Individual {
        given: Option<String>,
        family: Option<String>,
    },
    /// A group or channel posting under its own name.
    Group { title: String },
    /// Anything the source could not classify.
    Unrecognized,
}

impl AuthorKind {
    pub fn individual(given: &str, family: &str) -> Self {
        AuthorKind::Individual {
            given: Some(given.to_string()),
            family: Some(family.to_string()),
        }
    }

    pub fn group(title: &str) -> Self {
        AuthorKind::Group {
            title: title.to_string(),
        }
    }
}

/// A [`Message`] whose author has been turned into a display name.
///
/// `display_name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    pub timestamp: DateTime<Utc>,
    pub display_name: String,
    pub body: Option<String>,
}

/// Half-open interval `[start, end)` of eligible message timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Which messages a run should digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Everything posted since the window start.
    Since(TimeWindow),
    /// The most recent `n` messages regardless of age.
    Last(usize),
}

/// Where the finished digest is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Destination {
    /// Print to standard output.
    #[default]
    Stdout,
    /// Post back into the summarized chat.
    Chat,
    /// Send to the account's own Saved Messages.
    Saved,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub text: String,
    pub message_count: usize,
}
