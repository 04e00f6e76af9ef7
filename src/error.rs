//! Client error type.
//!
//! ERROR HANDLING
//! ==============
//! Every fallible operation in the crate returns [`ClientError`]. Backend
//! failures keep the HTTP status and the server's `message` field so the CLI
//! can print something more useful than a bare status code.

use std::path::PathBuf;

/// Errors produced by configuration, the session store, uploads and API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A configuration value is missing or malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The project name failed the allow-list check.
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    /// An upload or folder path is absolute or escapes its project.
    #[error("invalid relative path {path:?}: {reason}")]
    InvalidRelativePath { path: String, reason: &'static str },

    /// A folder upload was requested with no files in it.
    #[error("nothing to upload in {0}")]
    EmptyUpload(PathBuf),

    /// Login was attempted without a usable credential.
    #[error("login failed: no credential received from identity provider")]
    MissingCredential,

    /// The page was asked to do something its current state does not allow.
    #[error("page is {state}, cannot {action}")]
    InvalidPageState { state: &'static str, action: &'static str },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// A local file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking an upload folder failed.
    #[error("folder walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// A JSON document could not be encoded or decoded.
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ClientError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether retrying the same request could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Backend { status, .. } => matches!(status, 429 | 500..=599),
            _ => false,
        }
    }
}
