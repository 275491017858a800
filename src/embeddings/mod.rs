//! Embedding support.
//!
//! This module provides the embedding request/response types and the
//! [`Client::create_embeddings`](crate::Client::create_embeddings) call.

mod client;
mod types;

pub use client::EMBEDDINGS_SUFFIX;
pub use types::{Embedding, EmbeddingInput, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
