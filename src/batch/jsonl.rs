//! Newline-delimited JSON batch input files.
//!
//! Each line is one request object `{custom_id, method, url, body}`. Lines are
//! joined by `\n` with no trailing newline, in insertion order.

use super::types::BatchEndpoint;
use crate::chat::ChatCompletionRequest;
use crate::completions::CompletionRequest;
use crate::embeddings::EmbeddingRequest;
use crate::marshal::{self, JsonMarshaller, Marshaller};
use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Method of every batch line.
pub const BATCH_LINE_METHOD: &str = "POST";

/// File name used when an upload request leaves it empty.
pub const DEFAULT_BATCH_FILE_NAME: &str = "@batchinput.jsonl";

/// One typed batch line; decode a single JSONL line into the matching alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest<B> {
    pub custom_id: String,
    pub method: String,
    pub url: BatchEndpoint,
    pub body: B,
}

pub type BatchChatCompletionRequest = BatchRequest<ChatCompletionRequest>;
pub type BatchCompletionRequest = BatchRequest<CompletionRequest>;
pub type BatchEmbeddingRequest = BatchRequest<EmbeddingRequest>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchRequestBody {
    ChatCompletion(ChatCompletionRequest),
    Completion(CompletionRequest),
    Embedding(EmbeddingRequest),
}

impl BatchRequestBody {
    pub fn endpoint(&self) -> BatchEndpoint {
        match self {
            BatchRequestBody::ChatCompletion(_) => BatchEndpoint::ChatCompletions,
            BatchRequestBody::Completion(_) => BatchEndpoint::Completions,
            BatchRequestBody::Embedding(_) => BatchEndpoint::Embeddings,
        }
    }
}

/// Line of a batch input file with any of the supported bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchLineItem {
    pub custom_id: String,
    pub method: String,
    pub url: BatchEndpoint,
    pub body: BatchRequestBody,
}

impl BatchLineItem {
    pub fn new(custom_id: impl Into<String>, body: BatchRequestBody) -> Self {
        Self {
            custom_id: custom_id.into(),
            method: BATCH_LINE_METHOD.to_string(),
            url: body.endpoint(),
            body,
        }
    }
}

// The body shape is selected by `url`; the bodies overlap too much to be told apart
// structurally.
impl<'de> Deserialize<'de> for BatchLineItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            custom_id: String,
            method: String,
            url: BatchEndpoint,
            body: serde_json::Value,
        }

        let raw = Raw::deserialize(deserializer)?;
        let body = match raw.url {
            BatchEndpoint::ChatCompletions => {
                BatchRequestBody::ChatCompletion(serde_json::from_value(raw.body).map_err(D::Error::custom)?)
            }
            BatchEndpoint::Completions => {
                BatchRequestBody::Completion(serde_json::from_value(raw.body).map_err(D::Error::custom)?)
            }
            BatchEndpoint::Embeddings => {
                BatchRequestBody::Embedding(serde_json::from_value(raw.body).map_err(D::Error::custom)?)
            }
        };
        Ok(BatchLineItem {
            custom_id: raw.custom_id,
            method: raw.method,
            url: raw.url,
            body,
        })
    }
}

/// In-memory batch input file.
///
/// `custom_id` uniqueness is the caller's responsibility; bodies are not validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadBatchFileRequest {
    /// Defaults to [`DEFAULT_BATCH_FILE_NAME`] on upload when empty.
    pub file_name: String,
    pub lines: Vec<BatchLineItem>,
}

impl UploadBatchFileRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn add_chat_completion(&mut self, custom_id: impl Into<String>, body: ChatCompletionRequest) {
        self.lines
            .push(BatchLineItem::new(custom_id, BatchRequestBody::ChatCompletion(body)));
    }

    pub fn add_completion(&mut self, custom_id: impl Into<String>, body: CompletionRequest) {
        self.lines
            .push(BatchLineItem::new(custom_id, BatchRequestBody::Completion(body)));
    }

    pub fn add_embedding(&mut self, custom_id: impl Into<String>, body: EmbeddingRequest) {
        self.lines
            .push(BatchLineItem::new(custom_id, BatchRequestBody::Embedding(body)));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Encode with the default JSON marshaller.
    pub fn marshal_jsonl(&self) -> Result<Vec<u8>> {
        self.marshal_jsonl_with(&JsonMarshaller)
    }

    pub fn marshal_jsonl_with(&self, marshaller: &dyn Marshaller) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                buf.push(b'\n');
            }
            let encoded = marshal::encode(marshaller, line).map_err(Error::Marshal)?;
            buf.extend_from_slice(&encoded);
        }
        Ok(buf)
    }

    /// Parse a JSONL document back into line items. Blank lines are skipped.
    pub fn parse_jsonl(data: &[u8]) -> Result<Self> {
        let mut lines = Vec::new();
        for raw in data.split(|b| *b == b'\n') {
            if raw.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let item: BatchLineItem = marshal::decode(&JsonMarshaller, raw).map_err(Error::Decode)?;
            lines.push(item);
        }
        Ok(Self {
            file_name: String::new(),
            lines,
        })
    }
}
