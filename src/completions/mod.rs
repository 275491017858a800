//! Text completions (legacy endpoint).

mod client;
mod types;

pub use client::COMPLETIONS_SUFFIX;
pub use types::{CompletionChoice, CompletionRequest, CompletionResponse, Prompt};
