//! Batch API: JSONL input files and batch jobs.
//!
//! A batch is created from an uploaded JSONL file whose lines each describe one
//! request against a batchable endpoint. [`UploadBatchFileRequest`] builds that
//! file in memory; [`Client::create_batch_with_upload_file`](crate::Client::create_batch_with_upload_file)
//! uploads it and starts the batch in one call.
//!
//! ```rust,no_run
//! use oai_client::batch::{BatchEndpoint, CreateBatchWithUploadFileRequest, UploadBatchFileRequest};
//! use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
//! use oai_client::Client;
//!
//! # async fn run() -> oai_client::Result<()> {
//! let client = Client::new("sk-...")?;
//! let mut upload = UploadBatchFileRequest::new();
//! upload.add_chat_completion(
//!     "req-1",
//!     ChatCompletionRequest::new("gpt-4o-mini", vec![ChatCompletionMessage::user("Hello!")]),
//! );
//! let batch = client
//!     .create_batch_with_upload_file(&CreateBatchWithUploadFileRequest::new(
//!         BatchEndpoint::ChatCompletions,
//!         upload,
//!     ))
//!     .await?;
//! println!("{} {}", batch.id, batch.status);
//! # Ok(())
//! # }
//! ```

mod client;
mod jsonl;
mod types;

pub use client::{CreateBatchWithUploadFileRequest, BATCHES_SUFFIX};
pub use jsonl::{
    BatchChatCompletionRequest, BatchCompletionRequest, BatchEmbeddingRequest, BatchLineItem,
    BatchRequest, BatchRequestBody, UploadBatchFileRequest, BATCH_LINE_METHOD,
    DEFAULT_BATCH_FILE_NAME,
};
pub use types::{
    Batch, BatchEndpoint, BatchErrorItem, BatchErrors, BatchRequestCounts, CreateBatchRequest,
    ListBatchResponse, DEFAULT_COMPLETION_WINDOW,
};
