//! Transport-ready request assembly.

use crate::marshal::{JsonMarshaller, Marshaller};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

/// Body of an outgoing request.
pub enum RequestBody {
    /// Serialized by the builder's [`Marshaller`].
    Json(serde_json::Value),
    /// Multipart upload; reqwest sets the boundary content type.
    Multipart(reqwest::multipart::Form),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Json(v) => f.debug_tuple("Json").field(v).finish(),
            RequestBody::Multipart(form) => f
                .debug_struct("Multipart")
                .field("boundary", &form.boundary())
                .finish(),
        }
    }
}

/// Per-call request descriptor, consumed by [`RequestBuilder::build`].
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<RequestBody>,
    pub header: Option<HeaderMap>,
    /// Overlaid on `header` in order; later entries win.
    pub extra_headers: Vec<(String, String)>,
    /// Appended to the URL's query string after any existing parameters.
    pub extra_query: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            header: None,
            extra_headers: Vec::new(),
            extra_query: Vec::new(),
        }
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn header(mut self, headers: HeaderMap) -> Self {
        self.header = Some(headers);
        self
    }

    pub fn extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn extra_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_query.push((key.into(), value.into()));
        self
    }
}

/// Combines a [`Request`] descriptor into a `reqwest::Request`, serializing JSON bodies
/// through the injected [`Marshaller`].
#[derive(Clone)]
pub struct RequestBuilder {
    marshaller: Arc<dyn Marshaller>,
    http: reqwest::Client,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::with_marshaller(Arc::new(JsonMarshaller))
    }

    pub fn with_marshaller(marshaller: Arc<dyn Marshaller>) -> Self {
        Self {
            marshaller,
            http: reqwest::Client::new(),
        }
    }

    /// Use `http` to assemble requests so they share the transport's client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn marshaller(&self) -> &dyn Marshaller {
        self.marshaller.as_ref()
    }

    pub fn build(&self, request: Request) -> Result<reqwest::Request> {
        let Request {
            method,
            url,
            body,
            header,
            extra_headers,
            extra_query,
        } = request;

        let url = append_query(&url, &extra_query)?;

        let mut headers = header.unwrap_or_default();
        for (name, value) in &extra_headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let mut builder = self.http.request(method.clone(), url.clone());
        match body {
            None => {}
            Some(RequestBody::Json(value)) => {
                let bytes = self.marshaller.marshal(&value).map_err(Error::Marshal)?;
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                builder = builder.body(bytes);
            }
            Some(RequestBody::Multipart(form)) => {
                builder = builder.multipart(form);
            }
        }

        let built = builder.headers(headers).build().map_err(|e| {
            Error::request_with_context(
                "failed to assemble request",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("request_builder"),
            )
        })?;
        debug!(method = %method, url = %url, "built request");
        Ok(built)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn append_query(raw: &str, extra: &[(String, String)]) -> Result<::url::Url> {
    let mut url = ::url::Url::parse(raw).map_err(|e| {
        Error::url_with_context(
            format!("invalid request URL: {}", e),
            ErrorContext::new()
                .with_details(raw.to_string())
                .with_source("request_builder"),
        )
    })?;
    if !extra.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in extra {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let invalid = |what: &str| {
        Error::request_with_context(
            format!("invalid header {}", what),
            ErrorContext::new()
                .with_field_path("extra_headers")
                .with_details(name.to_string())
                .with_source("request_builder"),
        )
    };
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid("name"))?;
    let value = HeaderValue::from_str(value).map_err(|_| invalid("value"))?;
    Ok((name, value))
}
