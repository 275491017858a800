use super::types::{CompletionRequest, CompletionResponse};
use crate::client::{Client, UrlOptions};
use crate::Result;
use reqwest::Method;

pub const COMPLETIONS_SUFFIX: &str = "/completions";

impl Client {
    /// `POST /completions`.
    pub async fn create_completion(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let req = self.new_json_request(
            Method::POST,
            COMPLETIONS_SUFFIX,
            request,
            &UrlOptions::with_model(&request.model),
        )?;
        self.send(req).await
    }
}
