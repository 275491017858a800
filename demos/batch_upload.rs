//! Batch upload example
//!
//! Builds a JSONL batch input file in memory, uploads it, starts a batch and
//! polls it until it reaches a terminal state.
//!
//! Usage:
//!   OPENAI_API_KEY=sk-... cargo run --example batch_upload

use oai_client::batch::{BatchEndpoint, CreateBatchWithUploadFileRequest, UploadBatchFileRequest};
use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
use oai_client::{Client, ClientConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = Client::with_config(ClientConfig::from_env()?)?;

    let questions = [
        "What is the capital of Norway?",
        "Name three prime numbers.",
        "Translate 'good morning' to French.",
    ];
    let mut upload = UploadBatchFileRequest::new();
    for (i, question) in questions.iter().enumerate() {
        upload.add_chat_completion(
            format!("question-{}", i + 1),
            ChatCompletionRequest::new("gpt-4o-mini", vec![ChatCompletionMessage::user(*question)])
                .max_tokens(50),
        );
    }

    let mut batch = client
        .create_batch_with_upload_file(&CreateBatchWithUploadFileRequest::new(
            BatchEndpoint::ChatCompletions,
            upload,
        ))
        .await?;
    println!("created batch {} ({})", batch.id, batch.status);

    while !batch.is_terminal() {
        tokio::time::sleep(Duration::from_secs(30)).await;
        batch = client.retrieve_batch(&batch.id).await?;
        println!(
            "status: {} ({}/{} done, {} failed)",
            batch.status,
            batch.request_counts.completed,
            batch.request_counts.total,
            batch.request_counts.failed
        );
    }

    if let Some(output_file_id) = &batch.output_file_id {
        let output = client.get_file_content(output_file_id).await?;
        println!("{}", String::from_utf8_lossy(&output));
    }
    Ok(())
}
