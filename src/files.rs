//! File uploads and management (`/files`).

use crate::client::{Client, Request, UrlOptions};
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};

pub const FILES_SUFFIX: &str = "/files";

/// Intended use of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilePurpose {
    #[serde(rename = "fine-tune")]
    FineTune,
    #[serde(rename = "assistants")]
    Assistants,
    #[serde(rename = "batch")]
    Batch,
    #[serde(rename = "vision")]
    Vision,
    #[serde(rename = "user_data")]
    UserData,
}

impl FilePurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            FilePurpose::FineTune => "fine-tune",
            FilePurpose::Assistants => "assistants",
            FilePurpose::Batch => "batch",
            FilePurpose::Vision => "vision",
            FilePurpose::UserData => "user_data",
        }
    }
}

/// Upload request carrying the file content in memory.
#[derive(Debug, Clone)]
pub struct FileBytesRequest {
    pub name: String,
    pub bytes: Vec<u8>,
    pub purpose: FilePurpose,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesList {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub data: Vec<File>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDeleted {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub deleted: bool,
}

impl Client {
    /// `POST /files` as `multipart/form-data` with `purpose` and `file` parts.
    pub async fn create_file_bytes(&self, request: FileBytesRequest) -> Result<File> {
        if request.name.is_empty() {
            return Err(Error::request_with_context(
                "file name must not be empty",
                ErrorContext::new()
                    .with_field_path("request.name")
                    .with_source("files"),
            ));
        }
        let part = Part::bytes(request.bytes)
            .file_name(request.name)
            .mime_str("application/octet-stream")
            .map_err(|e| {
                Error::request_with_context(
                    "invalid mime type",
                    ErrorContext::new().with_details(e.to_string()),
                )
            })?;
        let form = Form::new()
            .text("purpose", request.purpose.as_str())
            .part("file", part);

        let url = self.full_url(FILES_SUFFIX, &UrlOptions::new());
        let req = self.build_request(Request::new(Method::POST, url).multipart(form))?;
        self.send(req).await
    }

    /// `GET /files`.
    pub async fn list_files(&self) -> Result<FilesList> {
        let req = self.new_request(Method::GET, FILES_SUFFIX, &UrlOptions::new())?;
        self.send(req).await
    }

    /// `GET /files/{file_id}`.
    pub async fn get_file(&self, file_id: &str) -> Result<File> {
        let suffix = format!("{}/{}", FILES_SUFFIX, file_id);
        let req = self.new_request(Method::GET, &suffix, &UrlOptions::new())?;
        self.send(req).await
    }

    /// `DELETE /files/{file_id}`.
    pub async fn delete_file(&self, file_id: &str) -> Result<FileDeleted> {
        let suffix = format!("{}/{}", FILES_SUFFIX, file_id);
        let req = self.new_request(Method::DELETE, &suffix, &UrlOptions::new())?;
        self.send(req).await
    }

    /// `GET /files/{file_id}/content`, returned verbatim (e.g. a batch output JSONL file).
    pub async fn get_file_content(&self, file_id: &str) -> Result<Bytes> {
        let suffix = format!("{}/{}/content", FILES_SUFFIX, file_id);
        let req = self.new_request(Method::GET, &suffix, &UrlOptions::new())?;
        Ok(self.send_raw(req).await?.body)
    }
}
