//! Client configuration.
//!
//! The backend origin and the server-side project root are supplied from
//! outside (CLI flags, environment, `.env`) and validated here before any
//! request is built from them.

use std::path::PathBuf;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SESSION_FILE: &str = ".projfiles/session.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub project_root: Option<String>,
    pub session_file: PathBuf,
    pub timeouts: HttpTimeouts,
}

impl ClientConfig {
    /// Validate raw settings into a typed config.
    ///
    /// - `api_base_url`: `http://` or `https://` origin, trailing `/` trimmed
    /// - `project_root`: optional here; commands that list or upload call
    ///   [`ClientConfig::require_project_root`]
    /// - `timeouts`: both must be non-zero
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] naming the offending setting.
    pub fn new(
        api_base_url: &str,
        project_root: Option<&str>,
        session_file: PathBuf,
        timeouts: HttpTimeouts,
    ) -> Result<Self, ClientError> {
        let api_base_url = parse_base_url(api_base_url)?;
        let project_root = project_root.map(parse_project_root).transpose()?;
        if session_file.as_os_str().is_empty() {
            return Err(ClientError::InvalidConfig("session file path is empty".into()));
        }
        if timeouts.request_secs == 0 || timeouts.connect_secs == 0 {
            return Err(ClientError::InvalidConfig("timeouts must be at least one second".into()));
        }
        Ok(Self { api_base_url, project_root, session_file, timeouts })
    }

    /// Return the project root or fail when none was configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] when the root is unset.
    pub fn require_project_root(&self) -> Result<&str, ClientError> {
        self.project_root
            .as_deref()
            .ok_or_else(|| ClientError::InvalidConfig("project root is required (PROJFILES_PROJECT_ROOT)".into()))
    }
}

fn parse_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ClientError::InvalidConfig(format!("api base url must start with http:// or https://: {raw}")))?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(ClientError::InvalidConfig(format!("api base url has no host: {raw}")));
    }
    if rest.contains(['?', '#']) || rest.chars().any(char::is_whitespace) {
        return Err(ClientError::InvalidConfig(format!("api base url must be a bare origin or path: {raw}")));
    }
    Ok(trimmed.to_owned())
}

fn parse_project_root(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    let root = trimmed.trim_end_matches(['/', '\\']);
    if root.is_empty() {
        // "/" alone trims to nothing; keep it so listings can target the filesystem root.
        if trimmed.starts_with('/') {
            return Ok("/".to_owned());
        }
        return Err(ClientError::InvalidConfig("project root is empty".into()));
    }
    Ok(root.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
