//! Basic usage example
//!
//! Sends one chat completion and one embedding request using configuration
//! read from the environment.
//!
//! - OPENAI_API_KEY (required)
//! - OPENAI_API_TYPE / OPENAI_BASE_URL / OPENAI_API_VERSION for Azure backends
//!
//! Usage:
//!   OPENAI_API_KEY=sk-... cargo run --example basic_usage

use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
use oai_client::embeddings::EmbeddingRequest;
use oai_client::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    println!("backend: {} ({})", config.api_type, config.base_url);
    let client = Client::with_config(config)?;

    let request = ChatCompletionRequest::new(
        "gpt-4o-mini",
        vec![
            ChatCompletionMessage::system("You are a helpful assistant."),
            ChatCompletionMessage::user("Hello! Say something short."),
        ],
    )
    .max_tokens(64);

    let response = client.create_chat_completion(&request).await?;
    println!("assistant: {}", response.content().unwrap_or_default());
    println!(
        "usage: {} prompt + {} completion tokens",
        response.usage.prompt_tokens, response.usage.completion_tokens
    );

    let embeddings = client
        .create_embeddings(&EmbeddingRequest::single("text-embedding-3-small", "hello world"))
        .await?;
    if let Some(first) = embeddings.first() {
        println!("embedding dimensions: {}", first.dimensions());
    }

    Ok(())
}
