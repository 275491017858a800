use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::client::{Client, UrlOptions};
use crate::{Error, ErrorContext, Result};
use reqwest::Method;

pub const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";

impl Client {
    /// `POST /chat/completions`. On Azure the deployment is resolved from `request.model`.
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        if request.stream == Some(true) {
            return Err(Error::request_with_context(
                "streaming is not supported by create_chat_completion",
                ErrorContext::new()
                    .with_field_path("request.stream")
                    .with_source("chat"),
            ));
        }
        let req = self.new_json_request(
            Method::POST,
            CHAT_COMPLETIONS_SUFFIX,
            request,
            &UrlOptions::with_model(&request.model),
        )?;
        self.send(req).await
    }
}
