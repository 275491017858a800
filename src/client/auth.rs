//! Credential headers per backend.

use crate::config::{ApiType, ClientConfig};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

/// Header carrying the raw key on Azure-shaped backends.
pub const AZURE_API_KEY_HEADER: &str = "api-key";
pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// Stamp the credential header required by `config.api_type` onto `headers`.
///
/// Exactly one of `Authorization` / `api-key` is set; neither when no token is configured.
pub fn apply_auth(headers: &mut HeaderMap, config: &ClientConfig) -> Result<()> {
    if !config.auth_token.is_empty() {
        match config.api_type {
            ApiType::OpenAI | ApiType::AzureAd => {
                let value = header_value(&format!("Bearer {}", config.auth_token), "auth_token")?;
                headers.remove(HeaderName::from_static(AZURE_API_KEY_HEADER));
                headers.insert(AUTHORIZATION, value);
            }
            ApiType::Azure | ApiType::CloudflareAzure => {
                let value = header_value(&config.auth_token, "auth_token")?;
                headers.remove(AUTHORIZATION);
                headers.insert(HeaderName::from_static(AZURE_API_KEY_HEADER), value);
            }
        }
    }

    if config.api_type == ApiType::OpenAI {
        if let Some(org) = config.org_id.as_deref().filter(|o| !o.is_empty()) {
            headers.insert(
                HeaderName::from_static("openai-organization"),
                header_value(org, "org_id")?,
            );
        }
    }
    Ok(())
}

fn header_value(raw: &str, field: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(raw).map_err(|_| {
        Error::auth_with_context(
            "credential is not a valid header value",
            ErrorContext::new()
                .with_field_path(field)
                .with_source("auth"),
        )
    })?;
    value.set_sensitive(true);
    Ok(value)
}
