use super::jsonl::{UploadBatchFileRequest, DEFAULT_BATCH_FILE_NAME};
use super::types::{Batch, BatchEndpoint, CreateBatchRequest, ListBatchResponse, DEFAULT_COMPLETION_WINDOW};
use crate::client::{Client, Request, UrlOptions};
use crate::files::{File, FileBytesRequest, FilePurpose};
use crate::Result;
use reqwest::Method;
use std::collections::HashMap;
use tracing::debug;

pub const BATCHES_SUFFIX: &str = "/batches";

/// Parameters for [`Client::create_batch_with_upload_file`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBatchWithUploadFileRequest {
    pub endpoint: BatchEndpoint,
    /// Defaults to `24h` when left empty.
    pub completion_window: String,
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    pub upload: UploadBatchFileRequest,
}

impl CreateBatchWithUploadFileRequest {
    pub fn new(endpoint: BatchEndpoint, upload: UploadBatchFileRequest) -> Self {
        Self {
            endpoint,
            completion_window: DEFAULT_COMPLETION_WINDOW.to_string(),
            metadata: None,
            upload,
        }
    }
}

impl Client {
    /// Encode `request` as JSONL and upload it with purpose `batch`.
    pub async fn upload_batch_file(&self, request: &UploadBatchFileRequest) -> Result<File> {
        let name = if request.file_name.is_empty() {
            DEFAULT_BATCH_FILE_NAME.to_string()
        } else {
            request.file_name.clone()
        };
        let bytes = request.marshal_jsonl_with(self.marshaller())?;
        debug!(file_name = %name, lines = request.len(), bytes = bytes.len(), "uploading batch file");
        self.create_file_bytes(FileBytesRequest {
            name,
            bytes,
            purpose: FilePurpose::Batch,
        })
        .await
    }

    /// `POST /batches`.
    pub async fn create_batch(&self, request: &CreateBatchRequest) -> Result<Batch> {
        let mut body = request.clone();
        if body.completion_window.is_empty() {
            body.completion_window = DEFAULT_COMPLETION_WINDOW.to_string();
        }
        let req = self.new_json_request(Method::POST, BATCHES_SUFFIX, &body, &UrlOptions::new())?;
        self.send(req).await
    }

    /// Upload the input file, then create a batch over it.
    ///
    /// A failed upload returns before any batch is created.
    pub async fn create_batch_with_upload_file(
        &self,
        request: &CreateBatchWithUploadFileRequest,
    ) -> Result<Batch> {
        let file = self.upload_batch_file(&request.upload).await?;
        self.create_batch(&CreateBatchRequest {
            input_file_id: file.id,
            endpoint: request.endpoint,
            completion_window: request.completion_window.clone(),
            metadata: request.metadata.clone(),
        })
        .await
    }

    /// `GET /batches/{batch_id}`.
    pub async fn retrieve_batch(&self, batch_id: &str) -> Result<Batch> {
        let suffix = format!("{}/{}", BATCHES_SUFFIX, batch_id);
        let req = self.new_request(Method::GET, &suffix, &UrlOptions::new())?;
        self.send(req).await
    }

    /// `POST /batches/{batch_id}/cancel`.
    pub async fn cancel_batch(&self, batch_id: &str) -> Result<Batch> {
        let suffix = format!("{}/{}/cancel", BATCHES_SUFFIX, batch_id);
        let req = self.new_request(Method::POST, &suffix, &UrlOptions::new())?;
        self.send(req).await
    }

    /// `GET /batches`, paged with `after` (a batch id) and `limit`.
    pub async fn list_batch(&self, after: Option<&str>, limit: Option<u32>) -> Result<ListBatchResponse> {
        let mut request = Request::new(Method::GET, self.full_url(BATCHES_SUFFIX, &UrlOptions::new()));
        if let Some(after) = after {
            request = request.extra_query("after", after);
        }
        if let Some(limit) = limit {
            request = request.extra_query("limit", limit.to_string());
        }
        let req = self.build_request(request)?;
        self.send(req).await
    }
}
