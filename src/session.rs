//! Local key/value store holding the session marker.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the command-line stand-in for browser local storage: a small JSON
//! object on disk whose values may be any JSON type. Login writes
//! [`SESSION_KEY`]; logout removes it. Other keys in the file are left
//! untouched. There is no expiry or integrity check.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ClientError;

/// Key the session token is stored under.
pub const SESSION_KEY: &str = "google_token";

#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session token, if one is stored as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or is not JSON.
    pub fn token(&self) -> Result<Option<String>, ClientError> {
        let token = match self.load()? {
            Some(Value::Object(mut entries)) => match entries.remove(SESSION_KEY) {
                Some(Value::String(token)) => Some(token),
                _ => None,
            },
            _ => None,
        };
        Ok(token)
    }

    /// Store `token` as the session marker, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written, or if it holds
    /// a JSON document that is not an object.
    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        let mut entries = match self.load()? {
            Some(value) => serde_json::from_value::<Map<String, Value>>(value)?,
            None => Map::new(),
        };
        entries.insert(SESSION_KEY.to_owned(), Value::String(token.to_owned()));
        self.save(&entries)
    }

    /// Remove the session marker, whatever its value. Returns whether the key
    /// was present.
    ///
    /// Removing an absent key is not an error, and a missing store file is
    /// treated as empty. Other keys are written back unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read, is not JSON,
    /// or cannot be rewritten.
    pub fn clear_token(&self) -> Result<bool, ClientError> {
        let Some(Value::Object(mut entries)) = self.load()? else {
            return Ok(false);
        };
        let removed = entries.remove(SESSION_KEY).is_some();
        if removed {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<Option<Value>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(None),
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::io(&self.path, e)),
        }
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, text).map_err(|e| ClientError::io(&self.path, e))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
