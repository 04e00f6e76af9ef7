//! Wire DTOs for the project-files backend.

use serde::{Deserialize, Serialize};

/// One entry of a directory listing, rendered as received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub is_directory: bool,
}

/// Error body returned by the backend alongside non-2xx statuses.
///
/// Some routes answer `{"error": ...}` instead of `{"status": "error", "message": ...}`.
/// The `status` marker carries nothing the HTTP status doesn't, so it is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message in the body, if any.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
