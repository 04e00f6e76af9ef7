//! REST client for the project-files backend.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ClientError::Backend`] carrying the status and
//! the server's `message` (or `error`) field when the body has one. Success
//! bodies for mutations are opaque JSON; an empty body maps to `Value::Null`.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use super::types::{ErrorBody, FileEntry};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::project::{ProjectName, RelativePath};
use crate::upload::UploadBatch;

pub const LIST_DIRECTORY_PATH: &str = "/api/projects/list_dynamic/";
pub const UPLOAD_FOLDER_PATH: &str = "/api/projects/upload_folder/";
pub const UPLOAD_FILE_PATH: &str = "/api/projects/upload/";
pub const PROJECTS_PATH: &str = "/api/projects/";
pub const DELETE_FOLDER_PATH: &str = "/api/projects/delete_folder/";
pub const DELETE_PROJECT_PATH: &str = "/api/projects/delete/";

/// Backend operations the project page depends on. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ProjectBackend: Send + Sync {
    /// List the entries of a server-side directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or the body is not a listing.
    async fn list_directory(&self, directory: &str) -> Result<Vec<FileEntry>, ClientError>;

    /// Submit a folder upload batch.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if a file cannot be read or the backend rejects the batch.
    async fn upload_folder(&self, batch: UploadBatch) -> Result<Value, ClientError>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    /// Build a client for the configured backend. When `session_token` is
    /// present it is sent as a bearer token on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session_token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { http, base_url: config.api_base_url.clone(), session_token })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload one file into the project root via `POST /api/projects/upload/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the backend rejects it.
    pub async fn upload_file(&self, project: &ProjectName, source: &Path) -> Result<Value, ClientError> {
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ClientError::InvalidRelativePath {
                path: source.display().to_string(),
                reason: "file has no usable name",
            })?
            .to_owned();
        let bytes = tokio::fs::read(source).await.map_err(|e| ClientError::io(source, e))?;
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.clone()))
            .text("project", project.as_str().to_owned());

        let text = self.send(self.request(Method::POST, UPLOAD_FILE_PATH).multipart(form)).await?;
        tracing::info!(project = %project, file = %file_name, "file uploaded");
        parse_ack(&text)
    }

    /// Create a project directory via `POST /api/projects/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the project (e.g. it already exists).
    pub async fn create_project(&self, project: &ProjectName) -> Result<Value, ClientError> {
        let body = serde_json::json!({ "name": project.as_str() });
        let text = self.send(self.request(Method::POST, PROJECTS_PATH).json(&body)).await?;
        tracing::info!(project = %project, "project created");
        parse_ack(&text)
    }

    /// Remove a folder inside a project via `POST /api/projects/delete_folder/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot find or remove the folder.
    pub async fn delete_folder(&self, project: &ProjectName, folder: &RelativePath) -> Result<Value, ClientError> {
        let body = serde_json::json!({ "project": project.as_str(), "folder": folder.as_str() });
        let text = self.send(self.request(Method::POST, DELETE_FOLDER_PATH).json(&body)).await?;
        tracing::info!(project = %project, folder = %folder, "folder deleted");
        parse_ack(&text)
    }

    /// Remove a whole project via `DELETE /api/projects/delete/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot find or remove the project.
    pub async fn delete_project(&self, project: &ProjectName) -> Result<Value, ClientError> {
        let body = serde_json::json!({ "name": project.as_str() });
        let text = self.send(self.request(Method::DELETE, DELETE_PROJECT_PATH).json(&body)).await?;
        tracing::info!(project = %project, "project deleted");
        parse_ack(&text)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| fallback_message(status, &text));
            return Err(ClientError::Backend { status: status.as_u16(), message });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ProjectBackend for ApiClient {
    async fn list_directory(&self, directory: &str) -> Result<Vec<FileEntry>, ClientError> {
        let request = self.request(Method::GET, LIST_DIRECTORY_PATH).query(&[("directory", directory)]);
        let text = self.send(request).await?;
        let entries: Vec<FileEntry> = serde_json::from_str(&text)?;
        tracing::debug!(%directory, entries = entries.len(), "directory listed");
        Ok(entries)
    }

    async fn upload_folder(&self, batch: UploadBatch) -> Result<Value, ClientError> {
        let project = batch.project().clone();
        let files = batch.len();
        let form = batch.into_form().await?;
        let text = self.send(self.request(Method::POST, UPLOAD_FOLDER_PATH).multipart(form)).await?;
        tracing::info!(project = %project, files, "folder uploaded");
        parse_ack(&text)
    }
}

fn parse_ack(text: &str) -> Result<Value, ClientError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

fn fallback_message(status: reqwest::StatusCode, text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
