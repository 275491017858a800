//! # oai-client
//!
//! Async client for the OpenAI inference API and the Azure OpenAI deployments
//! that mirror it.
//!
//! ## Overview
//!
//! One [`Client`] talks to any of the supported backends. The backend is picked by
//! [`ApiType`] in [`ClientConfig`] and decides how URLs are shaped and how the
//! credential is presented; endpoint wrappers never branch on it themselves.
//!
//! - **URL construction**: direct base + suffix, Azure deployment paths with
//!   `api-version`, or a Cloudflare AI Gateway in front of Azure
//! - **Authentication**: `Authorization: Bearer` or `api-key`, plus the optional
//!   organization header
//! - **Pluggable encoding**: request and response bodies go through a
//!   [`marshal::Marshaller`]
//! - **Batch API**: build JSONL input files in memory, upload them and drive batch jobs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
//! use oai_client::{Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> oai_client::Result<()> {
//!     let client = Client::with_config(ClientConfig::from_env()?)?;
//!
//!     let request = ChatCompletionRequest::new(
//!         "gpt-4o-mini",
//!         vec![ChatCompletionMessage::user("Hello, how are you?")],
//!     );
//!     let response = client.create_chat_completion(&request).await?;
//!     println!("{}", response.content().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Backend selection and client configuration |
//! | [`client`] | URL builder, auth, request builder and the [`Client`] core |
//! | [`transport`] | HTTP transport seam |
//! | [`marshal`] | Body encoding |
//! | [`batch`] | JSONL batch files and batch jobs |
//! | [`files`] | File upload and management |
//! | [`engines`] | Engine listing |
//! | [`chat`], [`completions`], [`embeddings`] | Inference endpoints |

pub mod batch;
pub mod chat;
pub mod client;
pub mod completions;
pub mod config;
pub mod embeddings;
pub mod engines;
pub mod files;
pub mod marshal;
pub mod transport;

// Re-export main types for convenience
pub use client::{Client, ClientBuilder};
pub use config::{ApiType, ClientConfig};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
