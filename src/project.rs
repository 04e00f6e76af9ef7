//! Project identifiers and server-side path construction.
//!
//! DESIGN
//! ======
//! Project names arrive from user input and end up inside a filesystem path
//! on the backend. They are allow-listed here so nothing outside
//! `[A-Za-z0-9._-]` (and no `.`/`..`) can reach [`ProjectName::directory_path`].
//! Relative upload paths get the same treatment per component.

use std::fmt;

use crate::error::ClientError;

pub const MAX_PROJECT_NAME_LEN: usize = 128;

/// A project name that is safe to join onto the project root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a raw project name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidProjectName`] when the name is empty,
    /// too long, a dot segment, or contains a character outside the allow-list.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let reject = |reason| ClientError::InvalidProjectName { name: raw.to_owned(), reason };

        if raw.is_empty() {
            return Err(reject("name is empty"));
        }
        if raw.len() > MAX_PROJECT_NAME_LEN {
            return Err(reject("name is too long"));
        }
        if raw == "." || raw == ".." {
            return Err(reject("name is a dot segment"));
        }
        if !raw.chars().all(is_name_char) {
            return Err(reject("only letters, digits, '-', '_' and '.' are allowed"));
        }
        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Server-side directory for this project under `root`.
    #[must_use]
    pub fn directory_path(&self, root: &str) -> String {
        if root.ends_with('/') {
            format!("{root}{}", self.0)
        } else {
            format!("{root}/{}", self.0)
        }
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// A `/`-separated path relative to a project directory.
///
/// Backslashes are normalized to `/`; empty, `.` and `..` components are
/// rejected rather than collapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativePath(String);

impl RelativePath {
    /// Validate a relative path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRelativePath`] for absolute paths, empty
    /// components, dot segments, or control characters.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let reject = |reason| ClientError::InvalidRelativePath { path: raw.to_owned(), reason };

        let normalized = raw.replace('\\', "/");
        if normalized.is_empty() {
            return Err(reject("path is empty"));
        }
        if normalized.starts_with('/') || normalized.get(1..2) == Some(":") {
            return Err(reject("path must be relative"));
        }
        for component in normalized.split('/') {
            match component {
                "" => return Err(reject("path has an empty component")),
                "." | ".." => return Err(reject("path has a dot segment")),
                _ if component.chars().any(char::is_control) => {
                    return Err(reject("path has a control character"));
                }
                _ => {}
            }
        }
        Ok(Self(normalized))
    }

    /// Join individual names into a relative path.
    ///
    /// Unlike [`RelativePath::parse`], a name containing `/` or `\` is
    /// rejected instead of being split, so a file literally named `a\b.txt`
    /// can never turn into a nested path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRelativePath`] for a name with a separator
    /// or for anything [`RelativePath::parse`] rejects.
    pub fn from_components<S: AsRef<str>>(components: &[S]) -> Result<Self, ClientError> {
        let names: Vec<&str> = components.iter().map(|c| c.as_ref()).collect();
        let joined = names.join("/");
        if names.iter().any(|name| name.contains(['/', '\\'])) {
            return Err(ClientError::InvalidRelativePath { path: joined, reason: "name contains a path separator" });
        }
        Self::parse(&joined)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
