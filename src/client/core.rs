use crate::client::auth::apply_auth;
use crate::client::request::{Request, RequestBuilder};
use crate::client::url::{full_url, UrlOptions};
use crate::config::ClientConfig;
use crate::error::ErrorResponse;
use crate::marshal::{self, MarshalError, Marshaller};
use crate::transport::{HttpResponse, Transport, TransportError};
use crate::{Error, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Client for the inference API.
///
/// Cloning is cheap; clones share the configuration, transport and request builder.
#[derive(Clone)]
pub struct Client {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) builder: Arc<RequestBuilder>,
    pub(crate) cancel: Option<CancellationToken>,
}

impl Client {
    /// Direct API client for `auth_token` with default settings.
    pub fn new(auth_token: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(auth_token))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        crate::client::builder::ClientBuilder::new(config).build()
    }

    pub fn builder(config: ClientConfig) -> crate::client::builder::ClientBuilder {
        crate::client::builder::ClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn marshaller(&self) -> &dyn Marshaller {
        self.builder.marshaller()
    }

    /// A handle whose requests fail with [`TransportError::Cancelled`] once `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub fn full_url(&self, suffix: &str, opts: &UrlOptions) -> String {
        full_url(&self.config, suffix, opts)
    }

    /// Build an authenticated body-less request for `suffix`.
    pub fn new_request(&self, method: Method, suffix: &str, opts: &UrlOptions) -> Result<reqwest::Request> {
        self.build_request(Request::new(method, self.full_url(suffix, opts)))
    }

    /// Build an authenticated request for `suffix` carrying `body` as JSON.
    pub fn new_json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        suffix: &str,
        body: &B,
        opts: &UrlOptions,
    ) -> Result<reqwest::Request> {
        let value = serde_json::to_value(body).map_err(|e| Error::Marshal(MarshalError::Json(e)))?;
        self.build_request(Request::new(method, self.full_url(suffix, opts)).json(value))
    }

    /// Assemble `request` through the request builder and stamp default and auth headers.
    pub fn build_request(&self, request: Request) -> Result<reqwest::Request> {
        let mut built = self.builder.build(request)?;
        let headers = built.headers_mut();
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json; charset=utf-8"));
        }
        apply_auth(headers, &self.config)?;
        Ok(built)
    }

    /// Send `request` and decode a successful body into `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T> {
        let response = self.send_raw(request).await?;
        marshal::decode(self.marshaller(), &response.body).map_err(Error::Decode)
    }

    /// Send `request`, returning the raw response once the status is a success.
    pub async fn send_raw(&self, request: reqwest::Request) -> Result<HttpResponse> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(method = %method, url = %url, "sending request");

        let response = match &self.cancel {
            Some(token) => {
                if token.is_cancelled() {
                    return Err(TransportError::Cancelled.into());
                }
                tokio::select! {
                    _ = token.cancelled() => return Err(TransportError::Cancelled.into()),
                    res = self.transport.execute(request) => res?,
                }
            }
            None => self.transport.execute(request).await?,
        };

        if !response.is_success() {
            warn!(
                method = %method,
                url = %url,
                status = response.status.as_u16(),
                "request failed"
            );
            return Err(self.error_from_response(&response));
        }
        Ok(response)
    }

    fn error_from_response(&self, response: &HttpResponse) -> Error {
        let status = response.status.as_u16();
        match marshal::decode::<ErrorResponse>(self.marshaller(), &response.body) {
            Ok(ErrorResponse { error: Some(error) }) => Error::Api { status, error },
            _ => Error::Remote {
                status,
                body: response.text(),
            },
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
