use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;

use super::locale::Locale;
use crate::errors::DigestError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SESSION_FILE: &str = "tg-session.bin";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tg_api_id: i32,
    pub tg_api_hash: String,
    pub tg_invite_hash: String,
    pub tg_session: Option<String>,
    pub session_file: PathBuf,
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub language: Locale,
    pub timezone: Option<Tz>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DigestError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing. Every missing required key is reported
    /// in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DigestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            let value = get(key);
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let api_id_raw = require("TG_API_ID");
        let tg_api_hash = require("TG_API_HASH");
        let invite_raw = require("TG_INVITE_HASH");
        let google_api_key = require("GOOGLE_API_KEY");

        if !missing.is_empty() {
            return Err(DigestError::ConfigError(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let tg_api_id = api_id_raw
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| {
                DigestError::ConfigError(format!(
                    "TG_API_ID: expected a non-zero integer, got '{}'",
                    api_id_raw
                ))
            })?;

        let language = match get("DIGEST_LANGUAGE") {
            Some(raw) => raw.parse::<Locale>()?,
            None => Locale::default(),
        };

        let timezone = get("DIGEST_TIMEZONE")
            .map(|raw| {
                raw.trim().parse::<Tz>().map_err(|e| {
                    DigestError::ConfigError(format!("DIGEST_TIMEZONE: {}", e))
                })
            })
            .transpose()?;

        Ok(Self {
            tg_api_id,
            tg_api_hash,
            tg_invite_hash: normalize_invite_hash(&invite_raw),
            tg_session: get("TG_SESSION"),
            session_file: get("TG_SESSION_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from),
            google_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            language,
            timezone,
        })
    }
}

/// Extract the bare invite hash from `t.me/+HASH` or `t.me/joinchat/HASH` links.
/// Anything else is assumed to already be a hash.
#[must_use]
pub fn normalize_invite_hash(raw: &str) -> String {
    static INVITE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(?:https?://)?(?:t|telegram)\.me/(?:\+|joinchat/)([A-Za-z0-9_-]+)/?$")
            .expect("static regex compile")
    });

    let trimmed = raw.trim();
    INVITE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| trimmed.trim_start_matches('+').to_string(), |m| {
            m.as_str().to_string()
        })
}
