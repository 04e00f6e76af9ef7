//! Upload batches: a folder's files paired with their relative paths.
//!
//! DESIGN
//! ======
//! Relative paths start with the selected folder's own name, the same shape a
//! browser reports for a directory picker (`proj/src/index.js`). The batch
//! keeps files and paths in one ordered list so the multipart `files` and
//! `paths` parts can only ever be emitted as matched pairs.

use std::path::{Component, Path, PathBuf};

use reqwest::multipart::{Form, Part};
use walkdir::WalkDir;

use crate::error::ClientError;
use crate::project::{ProjectName, RelativePath};

/// A local file and the path it should land at inside the project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub source: PathBuf,
    pub relative_path: RelativePath,
}

impl UploadFile {
    /// Last component of the relative path, used as the part's file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        let path = self.relative_path.as_str();
        path.rsplit('/').next().unwrap_or(path)
    }
}

#[derive(Clone, Debug)]
pub struct UploadBatch {
    project: ProjectName,
    files: Vec<UploadFile>,
}

impl UploadBatch {
    /// Build a batch from explicit files, preserving their order.
    #[must_use]
    pub fn new(project: ProjectName, files: Vec<UploadFile>) -> Self {
        Self { project, files }
    }

    /// Collect every regular file under `folder`, sorted by name within each
    /// directory. The folder name is taken from `folder` as given, so a
    /// symlinked folder keeps the name it was selected by. Symlinks inside the
    /// folder are not followed.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be read or walked, if a name is
    /// not valid UTF-8 or contains a path separator, or if the folder holds no
    /// files.
    pub fn from_folder(project: ProjectName, folder: &Path) -> Result<Self, ClientError> {
        std::fs::metadata(folder).map_err(|e| ClientError::io(folder, e))?;
        let folder_name = folder_name(folder)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(folder).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let mut components = vec![folder_name.clone()];
            components.extend(relative_components(folder, entry.path())?);
            files.push(UploadFile {
                source: entry.into_path(),
                relative_path: RelativePath::from_components(&components)?,
            });
        }

        if files.is_empty() {
            return Err(ClientError::EmptyUpload(folder.to_path_buf()));
        }
        tracing::debug!(project = %project, files = files.len(), folder = %folder.display(), "collected upload batch");
        Ok(Self { project, files })
    }

    #[must_use]
    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    #[must_use]
    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Relative paths in submission order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.relative_path.as_str()).collect()
    }

    /// Read every file and assemble the multipart form: a `files` part and a
    /// `paths` part per file, in order, then one `project` part.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if a file cannot be read.
    pub async fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for file in &self.files {
            let bytes = tokio::fs::read(&file.source)
                .await
                .map_err(|e| ClientError::io(&file.source, e))?;
            let part = Part::bytes(bytes).file_name(file.file_name().to_owned());
            form = form.part("files", part).text("paths", file.relative_path.as_str().to_owned());
        }
        Ok(form.text("project", self.project.as_str().to_owned()))
    }
}

/// Last component of `folder`; `.`/`..` and the like fall back to the
/// canonical directory's name.
fn folder_name(folder: &Path) -> Result<String, ClientError> {
    let unusable = || ClientError::InvalidRelativePath {
        path: folder.display().to_string(),
        reason: "folder has no usable name",
    };

    if let Some(name) = folder.file_name() {
        return name.to_str().map(ToOwned::to_owned).ok_or_else(unusable);
    }
    let canonical = std::fs::canonicalize(folder).map_err(|e| ClientError::io(folder, e))?;
    canonical
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .ok_or_else(unusable)
}

fn relative_components(base: &Path, path: &Path) -> Result<Vec<String>, ClientError> {
    let invalid = |reason| ClientError::InvalidRelativePath { path: path.display().to_string(), reason };

    let stripped = path.strip_prefix(base).map_err(|_| invalid("file is outside the upload folder"))?;
    let mut parts = Vec::new();
    for component in stripped.components() {
        let Component::Normal(part) = component else {
            return Err(invalid("unexpected path component"));
        };
        parts.push(part.to_str().ok_or_else(|| invalid("path is not valid UTF-8"))?.to_owned());
    }
    Ok(parts)
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
