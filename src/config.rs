//! Backend configuration.
//!
//! A [`ClientConfig`] describes how to reach the API: which backend kind, which base
//! URL, which credential and, for Azure, which API version and deployment names. It is
//! built once and shared read-only by every request the client makes.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const OPENAI_API_URL_V1: &str = "https://api.openai.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2023-05-15";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Backend kind the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiType {
    #[default]
    #[serde(rename = "openai", alias = "open_ai")]
    OpenAI,
    Azure,
    #[serde(rename = "azure_ad")]
    AzureAd,
    /// Azure-shaped paths relayed through a Cloudflare AI gateway.
    #[serde(rename = "cloudflare_azure")]
    CloudflareAzure,
}

impl ApiType {
    pub fn is_azure(self) -> bool {
        matches!(self, ApiType::Azure | ApiType::AzureAd)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiType::OpenAI => "openai",
            ApiType::Azure => "azure",
            ApiType::AzureAd => "azure_ad",
            ApiType::CloudflareAzure => "cloudflare_azure",
        }
    }
}

impl FromStr for ApiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "" | "openai" | "open_ai" => Ok(ApiType::OpenAI),
            "azure" => Ok(ApiType::Azure),
            "azure_ad" => Ok(ApiType::AzureAd),
            "cloudflare_azure" => Ok(ApiType::CloudflareAzure),
            other => Err(Error::configuration_with_context(
                "unknown api type",
                ErrorContext::new()
                    .with_field_path("api_type")
                    .with_details(other.to_string()),
            )),
        }
    }
}

impl std::fmt::Display for ApiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration shared by every request a client makes.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub auth_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default)]
    pub api_type: ApiType,
    #[serde(default)]
    pub api_version: String,
    /// Logical model name -> Azure deployment name.
    #[serde(default)]
    pub azure_model_mapper: HashMap<String, String>,
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub http_timeout: Duration,
    /// How long an idle pooled connection is kept open.
    #[serde(default = "default_pool_idle_timeout", with = "duration_secs")]
    pub pool_idle_timeout: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_base_url() -> String {
    OPENAI_API_URL_V1.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
}

fn default_pool_idle_timeout() -> Duration {
    Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT_SECS)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

// The token never shows up in Debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_token", &if self.auth_token.is_empty() { "" } else { "***" })
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .field("api_type", &self.api_type)
            .field("api_version", &self.api_version)
            .field("azure_model_mapper", &self.azure_model_mapper)
            .field("http_timeout", &self.http_timeout)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

impl ClientConfig {
    /// Direct API configuration against the public endpoint.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            base_url: default_base_url(),
            org_id: None,
            api_type: ApiType::OpenAI,
            api_version: String::new(),
            azure_model_mapper: HashMap::new(),
            http_timeout: default_timeout(),
            pool_idle_timeout: default_pool_idle_timeout(),
            proxy_url: None,
        }
    }

    /// Azure configuration using an `api-key` credential.
    pub fn azure(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_type: ApiType::Azure,
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            ..Self::new(api_key)
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_type(mut self, api_type: ApiType) -> Self {
        self.api_type = api_type;
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        let org_id = org_id.into();
        self.org_id = (!org_id.is_empty()).then_some(org_id);
        self
    }

    pub fn with_deployment(mut self, model: impl Into<String>, deployment: impl Into<String>) -> Self {
        self.azure_model_mapper.insert(model.into(), deployment.into());
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Deployment name for a logical model; falls back to the model name itself.
    pub fn deployment_for_model<'a>(&'a self, model: &'a str) -> &'a str {
        self.azure_model_mapper
            .get(model)
            .map(String::as_str)
            .unwrap_or(model)
    }

    /// API version for Azure-shaped backends, defaulted when left empty.
    pub fn effective_api_version(&self) -> &str {
        if self.api_version.is_empty() {
            DEFAULT_AZURE_API_VERSION
        } else {
            &self.api_version
        }
    }

    /// Build a configuration from `OPENAI_*` environment variables.
    ///
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL`, `OPENAI_API_TYPE`, `OPENAI_API_VERSION`, `OPENAI_ORG_ID`
    /// - `OPENAI_HTTP_TIMEOUT_SECS` (default 30), `OPENAI_HTTP_POOL_IDLE_TIMEOUT_SECS`
    ///   (default 90), `OPENAI_PROXY_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = var("OPENAI_API_KEY").ok_or_else(|| {
            Error::configuration_with_context(
                "API key required",
                ErrorContext::new().with_field_path("OPENAI_API_KEY"),
            )
        })?;
        let api_type = match var("OPENAI_API_TYPE") {
            Some(s) => s.parse::<ApiType>()?,
            None => ApiType::OpenAI,
        };

        let mut config = match var("OPENAI_BASE_URL") {
            Some(base) if api_type != ApiType::OpenAI => ClientConfig::azure(token, base),
            Some(base) => ClientConfig::new(token).with_base_url(base),
            None => ClientConfig::new(token),
        }
        .with_api_type(api_type);

        if let Some(version) = var("OPENAI_API_VERSION") {
            config.api_version = version;
        }
        if let Some(org) = var("OPENAI_ORG_ID") {
            config = config.with_org_id(org);
        }
        if let Some(raw) = var("OPENAI_HTTP_TIMEOUT_SECS") {
            config.http_timeout = parse_secs("OPENAI_HTTP_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = var("OPENAI_HTTP_POOL_IDLE_TIMEOUT_SECS") {
            config.pool_idle_timeout = parse_secs("OPENAI_HTTP_POOL_IDLE_TIMEOUT_SECS", &raw)?;
        }
        if let Some(proxy) = var("OPENAI_PROXY_URL") {
            config.proxy_url = Some(proxy);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration document. A missing token is taken from `OPENAI_API_KEY`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config: ClientConfig = serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "invalid configuration document",
                ErrorContext::new().with_details(e.to_string()),
            )
        })?;
        if config.auth_token.is_empty() {
            config.auth_token = env::var("OPENAI_API_KEY").unwrap_or_default();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_source(path.display().to_string()),
            },
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "base URL must not be empty",
                ErrorContext::new().with_field_path("base_url"),
            ));
        }
        Ok(())
    }
}

fn parse_secs(field: &str, raw: &str) -> Result<Duration> {
    raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid number of seconds: {}", e),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(raw.to_string()),
        )
    })
}
