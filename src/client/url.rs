//! Target URL construction per backend.

use crate::config::{ApiType, ClientConfig};

const AZURE_API_PREFIX: &str = "openai";
const AZURE_DEPLOYMENTS_PREFIX: &str = "deployments";

/// Deployment segment used on Azure when a call carries no model at all.
const UNKNOWN_DEPLOYMENT: &str = "UNKNOWN";

/// Suffixes that address the resource rather than a deployment on Azure.
const MODEL_AGNOSTIC_SUFFIXES: [&str; 4] = ["/models", "/assistants", "/threads", "/files"];

/// Per-call URL options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    /// Logical model; selects the Azure deployment.
    pub model: Option<String>,
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
        }
    }
}

/// Build the absolute URL for `suffix` (a path starting with `/`, optionally with a
/// query string) against the configured backend.
pub fn full_url(config: &ClientConfig, suffix: &str, opts: &UrlOptions) -> String {
    let base = config.base_url.trim_end_matches('/');

    match config.api_type {
        ApiType::OpenAI => format!("{}{}", base, suffix),
        ApiType::Azure | ApiType::AzureAd => {
            let (path, query) = split_suffix(suffix);
            let query = merge_query(config.effective_api_version(), query);
            if is_model_agnostic(suffix) {
                return format!("{}/{}{}?{}", base, AZURE_API_PREFIX, path, query);
            }
            let deployment = resolve_deployment(config, opts);
            format!(
                "{}/{}/{}/{}{}?{}",
                base, AZURE_API_PREFIX, AZURE_DEPLOYMENTS_PREFIX, deployment, path, query
            )
        }
        // The gateway base URL already carries the resource and deployment segments.
        ApiType::CloudflareAzure => {
            let (path, query) = split_suffix(suffix);
            let query = merge_query(config.effective_api_version(), query);
            format!("{}{}?{}", base, path, query)
        }
    }
}

fn resolve_deployment<'a>(config: &'a ClientConfig, opts: &'a UrlOptions) -> &'a str {
    match opts.model.as_deref() {
        Some(model) if !model.is_empty() => config.deployment_for_model(model),
        _ => UNKNOWN_DEPLOYMENT,
    }
}

fn is_model_agnostic(suffix: &str) -> bool {
    MODEL_AGNOSTIC_SUFFIXES.iter().any(|s| suffix.contains(s))
}

fn split_suffix(suffix: &str) -> (&str, Option<&str>) {
    match suffix.split_once('?') {
        Some((path, query)) => (path, Some(query).filter(|q| !q.is_empty())),
        None => (suffix, None),
    }
}

// `api-version` always leads; the caller's query follows unchanged.
fn merge_query(api_version: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("api-version={}&{}", api_version, q),
        None => format!("api-version={}", api_version),
    }
}
