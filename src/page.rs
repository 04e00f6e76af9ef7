//! Project file page: listing state machine, folder upload, and rendering.
//!
//! DESIGN
//! ======
//! One page instance per project. `load` and `upload_folder` take `&mut self`,
//! so a page never has two of its own requests in flight. After a confirmed
//! upload the page re-fetches its listing instead of starting over.
//!
//! ```text
//! Idle -> Loading -> Loaded | Failed
//! Loaded -> Uploading -> Loading -> Loaded | Failed
//! Uploading -(upload error)-> Loaded (previous entries)
//! ```

use std::fmt;
use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use crate::error::ClientError;
use crate::net::api::ProjectBackend;
use crate::net::types::FileEntry;
use crate::project::ProjectName;
use crate::upload::UploadBatch;

pub const LOADING_TEXT: &str = "Loading files...";
pub const ERROR_TEXT: &str = "Error loading files.";
pub const UPLOADING_TEXT: &str = "Uploading folder...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Loading,
    Loaded(Vec<FileEntry>),
    Failed(String),
    Uploading(Vec<FileEntry>),
}

impl PageState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
            Self::Uploading(_) => "uploading",
        }
    }
}

pub struct ProjectFilesPage<B> {
    backend: B,
    project: ProjectName,
    directory: String,
    state: PageState,
}

impl<B: ProjectBackend> ProjectFilesPage<B> {
    #[must_use]
    pub fn new(backend: B, project: ProjectName, project_root: &str) -> Self {
        let directory = project.directory_path(project_root);
        Self { backend, project, directory, state: PageState::Idle }
    }

    #[must_use]
    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    /// Server-side directory this page lists.
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Fetch the listing. Failures land in [`PageState::Failed`].
    pub async fn load(&mut self) -> &PageState {
        self.state = PageState::Loading;
        self.state = match self.backend.list_directory(&self.directory).await {
            Ok(entries) => {
                tracing::info!(project = %self.project, entries = entries.len(), "project files loaded");
                PageState::Loaded(entries)
            }
            Err(e) => {
                tracing::error!(project = %self.project, directory = %self.directory, error = %e, "error loading files");
                PageState::Failed(e.to_string())
            }
        };
        &self.state
    }

    /// Upload every file under `folder`, then re-fetch the listing.
    ///
    /// Only allowed once the listing has loaded. When the upload fails the
    /// page goes back to the entries it showed before.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPageState`] when no listing is shown,
    /// or the batch/upload error otherwise.
    pub async fn upload_folder(&mut self, folder: &Path) -> Result<Value, ClientError> {
        let entries = match &self.state {
            PageState::Loaded(entries) => entries.clone(),
            other => return Err(ClientError::InvalidPageState { state: other.name(), action: "upload a folder" }),
        };
        let batch = UploadBatch::from_folder(self.project.clone(), folder)?;
        self.state = PageState::Uploading(entries);

        match self.backend.upload_folder(batch).await {
            Ok(ack) => {
                self.load().await;
                Ok(ack)
            }
            Err(e) => {
                tracing::error!(project = %self.project, error = %e, "error uploading folder");
                if let PageState::Uploading(entries) = std::mem::replace(&mut self.state, PageState::Idle) {
                    self.state = PageState::Loaded(entries);
                }
                Err(e)
            }
        }
    }

    /// Render the current state.
    #[must_use]
    pub fn view(&self) -> PageView {
        match &self.state {
            PageState::Idle | PageState::Loading => PageView::Loading,
            PageState::Failed(_) => PageView::Error,
            PageState::Loaded(entries) => self.listing(entries, false),
            PageState::Uploading(entries) => self.listing(entries, true),
        }
    }

    fn listing(&self, entries: &[FileEntry], uploading: bool) -> PageView {
        PageView::Listing {
            title: format!("{} Contents", self.project),
            entries: entries.iter().map(EntryLine::from).collect(),
            uploading,
        }
    }
}

/// A single rendered list item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryLine {
    pub label: String,
    /// Directories are emphasized (bold) and suffixed with `/`.
    pub emphasized: bool,
}

impl From<&FileEntry> for EntryLine {
    fn from(entry: &FileEntry) -> Self {
        if entry.is_directory {
            Self { label: format!("{}/", entry.name), emphasized: true }
        } else {
            Self { label: entry.name.clone(), emphasized: false }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView {
    Loading,
    Error,
    Listing { title: String, entries: Vec<EntryLine>, uploading: bool },
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "{LOADING_TEXT}"),
            Self::Error => writeln!(f, "{ERROR_TEXT}"),
            Self::Listing { title, entries, uploading } => {
                writeln!(f, "{}", title.as_str().underline())?;
                for entry in entries {
                    if entry.emphasized {
                        writeln!(f, "  {}", entry.label.as_str().bold())?;
                    } else {
                        writeln!(f, "  {}", entry.label)?;
                    }
                }
                if *uploading {
                    writeln!(f, "{UPLOADING_TEXT}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
