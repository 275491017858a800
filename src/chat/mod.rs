//! Chat completions.

mod client;
mod types;

pub use client::CHAT_COMPLETIONS_SUFFIX;
pub use types::{
    ChatCompletionChoice, ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse,
    FunctionCall, FunctionDefinition, MessageRole, Tool, ToolCall, Usage,
};
