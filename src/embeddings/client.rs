//! Embedding endpoint.

use super::types::{EmbeddingRequest, EmbeddingResponse};
use crate::client::{Client, UrlOptions};
use crate::Result;
use reqwest::Method;

pub const EMBEDDINGS_SUFFIX: &str = "/embeddings";

impl Client {
    /// `POST /embeddings`. On Azure the deployment is resolved from `request.model`.
    pub async fn create_embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        let req = self.new_json_request(
            Method::POST,
            EMBEDDINGS_SUFFIX,
            request,
            &UrlOptions::with_model(&request.model),
        )?;
        self.send(req).await
    }
}
