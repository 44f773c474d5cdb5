use chat_digest::core::locale::Locale;
use chat_digest::core::models::ResolvedMessage;
use chat_digest::pipeline::transcript::render;
use chrono::{TimeZone, Utc};

fn resolved(secs: i64, name: &str, body: Option<&str>) -> ResolvedMessage {
    ResolvedMessage {
        timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
        display_name: name.to_string(),
        body: body.map(str::to_string),
    }
}

#[test]
fn test_newest_first_batch_renders_oldest_first() {
    let batch = vec![
        resolved(3, "C", Some("third")),
        resolved(2, "B", Some("second")),
        resolved(1, "A", Some("first")),
    ];

    let transcript = render(&batch, Locale::En);
    let names: Vec<&str> = transcript
        .lines()
        .iter()
        .map(|l| l.split("] [").nth(1).unwrap().split(']').next().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(transcript.len(), batch.len());
}

#[test]
fn test_rendering_is_deterministic() {
    let batch = vec![
        resolved(1_704_189_600, "Ivan Petrenko", Some("hello")),
        resolved(1_704_099_600, "Olena", None),
    ];

    let first = render(&batch, Locale::Uk).to_string();
    let second = render(&batch.clone(), Locale::Uk).to_string();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_empty_body_uses_placeholder() {
    let transcript = render(&[resolved(0, "Olena", Some(""))], Locale::En).to_string();
    assert_eq!(transcript, "[1970-01-01T00:00:00.000Z] [Olena]: <Media or empty>");
    assert!(!transcript.ends_with(": "));

    let transcript = render(&[resolved(0, "Olena", None)], Locale::Uk).to_string();
    assert!(transcript.ends_with(Locale::Uk.empty_body()));
}

#[test]
fn test_scenario_transcript_text() {
    let batch = vec![
        ResolvedMessage {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
            display_name: "Ivan Petrenko".to_string(),
            body: Some("hello".to_string()),
        },
        ResolvedMessage {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            display_name: "Olena".to_string(),
            body: Some("bye".to_string()),
        },
    ];

    assert_eq!(
        render(&batch, Locale::En).to_string(),
        "[2024-01-01T09:00:00.000Z] [Olena]: bye\n[2024-01-02T10:00:00.000Z] [Ivan Petrenko]: hello"
    );
}

#[test]
fn test_no_trailing_newline() {
    let batch = vec![resolved(2, "B", Some("b")), resolved(1, "A", Some("a"))];
    let text = render(&batch, Locale::En).to_string();
    assert!(!text.ends_with('\n'));
    assert_eq!(text.matches('\n').count(), 1);
}
