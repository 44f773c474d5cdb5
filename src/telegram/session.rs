//! Where the serialized MTProto session lives between runs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::errors::DigestError;

/// Persistence for the opaque session blob.
pub trait SessionStore: Send + Sync {
    /// Previously saved session, or `None` when a fresh login is needed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if stored data exists but cannot be read.
    fn load(&self) -> Result<Option<Vec<u8>>, DigestError>;

    /// # Errors
    ///
    /// Returns `SessionError` if the session cannot be written.
    fn save(&self, data: &[u8]) -> Result<(), DigestError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Session kept in a local file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Vec<u8>>, DigestError> {
        match fs::read(&self.path) {
            Ok(data) if data.is_empty() => Ok(None),
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DigestError::SessionError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, data: &[u8]) -> Result<(), DigestError> {
        fs::write(&self.path, data).map_err(|e| {
            DigestError::SessionError(format!("{}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Session handed in through the environment as base64 (`TG_SESSION`).
///
/// The environment cannot be written back, so `save` only warns when the
/// session has drifted from what was provided.
#[derive(Debug, Clone)]
pub struct EnvSessionStore {
    token: String,
}

impl EnvSessionStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl SessionStore for EnvSessionStore {
    fn load(&self) -> Result<Option<Vec<u8>>, DigestError> {
        decode_session(&self.token).map(Some)
    }

    fn save(&self, data: &[u8]) -> Result<(), DigestError> {
        if encode_session(data) != self.token.trim() {
            warn!(
                "Session changed during the run; refresh TG_SESSION with --print-session to keep it current"
            );
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "environment variable TG_SESSION".to_string()
    }
}

/// Use the environment-provided session when present, the file otherwise.
#[must_use]
pub fn select_store(config: &AppConfig) -> Box<dyn SessionStore> {
    let store: Box<dyn SessionStore> = match &config.tg_session {
        Some(token) => Box::new(EnvSessionStore::new(token.clone())),
        None => Box::new(FileSessionStore::new(config.session_file.clone())),
    };
    info!("Using session store: {}", store.describe());
    store
}

#[must_use]
pub fn encode_session(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// # Errors
///
/// Returns `SessionError` if `token` is not valid base64.
pub fn decode_session(token: &str) -> Result<Vec<u8>, DigestError> {
    STANDARD
        .decode(token.trim())
        .map_err(|e| DigestError::SessionError(format!("TG_SESSION is not valid base64: {e}")))
}
