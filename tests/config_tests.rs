use std::collections::HashMap;
use std::path::PathBuf;

use chat_digest::DigestError;
use chat_digest::core::config::{AppConfig, DEFAULT_GEMINI_MODEL, DEFAULT_SESSION_FILE};
use chat_digest::core::locale::Locale;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 4] = [
    ("TG_API_ID", "12345"),
    ("TG_API_HASH", "0123456789abcdef"),
    ("TG_INVITE_HASH", "https://t.me/+AbCdEf"),
    ("GOOGLE_API_KEY", "google-key"),
];

#[test]
fn test_minimal_config_uses_defaults() {
    let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.tg_api_id, 12345);
    assert_eq!(config.tg_invite_hash, "AbCdEf");
    assert_eq!(config.tg_session, None);
    assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    assert_eq!(config.language, Locale::Uk);
    assert!(config.timezone.is_none());
}

#[test]
fn test_optional_values_override_defaults() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("TG_SESSION", "c2Vzc2lvbg=="),
        ("TG_SESSION_FILE", "/var/lib/digest/session.bin"),
        ("GEMINI_MODEL", "gemini-2.5-flash"),
        ("DIGEST_LANGUAGE", "en"),
        ("DIGEST_TIMEZONE", "Europe/Kyiv"),
    ]);

    let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(config.tg_session.as_deref(), Some("c2Vzc2lvbg=="));
    assert_eq!(config.session_file, PathBuf::from("/var/lib/digest/session.bin"));
    assert_eq!(config.gemini_model, "gemini-2.5-flash");
    assert_eq!(config.language, Locale::En);
    assert_eq!(config.timezone, Some(chrono_tz::Europe::Kyiv));
}

#[test]
fn test_missing_values_are_all_reported() {
    let err = AppConfig::from_lookup(lookup(&[("TG_API_ID", "1"), ("TG_API_HASH", "  ")]))
        .unwrap_err();

    match err {
        DigestError::ConfigError(msg) => {
            assert!(msg.contains("TG_API_HASH"));
            assert!(msg.contains("TG_INVITE_HASH"));
            assert!(msg.contains("GOOGLE_API_KEY"));
            assert!(!msg.contains("TG_API_ID"));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_api_id_must_be_non_zero_integer() {
    for bad in ["0", "abc", "12.5"] {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("TG_API_ID", bad);
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(
            matches!(err, DigestError::ConfigError(ref m) if m.contains("TG_API_ID")),
            "should reject TG_API_ID={bad}"
        );
    }
}

#[test]
fn test_invalid_language_and_timezone_are_rejected() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("DIGEST_LANGUAGE", "klingon"));
    assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());

    let mut pairs = REQUIRED.to_vec();
    pairs.push(("DIGEST_TIMEZONE", "Mars/Olympus_Mons"));
    assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
}
