//! Inference endpoints on direct and Azure backends

use crate::mock_server::{MockServerFixture, TEST_TOKEN};
use mockito::Matcher;
use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
use oai_client::completions::CompletionRequest;
use oai_client::embeddings::EmbeddingRequest;
use oai_client::{Client, ClientConfig, Error};
use serde_json::json;

const CHAT_RESPONSE: &str = r#"{
    "id": "chatcmpl-123",
    "object": "chat.completion",
    "created": 1677652288,
    "model": "gpt-3.5-turbo",
    "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi there"}, "finish_reason": "stop"}],
    "usage": {"prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11}
}"#;

fn chat_request() -> ChatCompletionRequest {
    ChatCompletionRequest::new("gpt-3.5-turbo", vec![ChatCompletionMessage::user("Hello!")]).max_tokens(5)
}

#[tokio::test]
async fn test_chat_completion() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/chat/completions")
            .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Hello!"}],
                "max_tokens": 5
            })))
            .with_status(200)
            .with_body(CHAT_RESPONSE)
            .create_async()
            .await
    };

    let resp = fixture.client().create_chat_completion(&chat_request()).await.unwrap();
    assert_eq!(resp.content(), Some("Hi there"));
    assert_eq!(resp.usage.total_tokens, 11);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_completion_on_azure_deployment() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/openai/deployments/chat-prod/chat/completions")
            .match_query(Matcher::UrlEncoded("api-version".into(), "2023-05-15".into()))
            .match_header("api-key", TEST_TOKEN)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(CHAT_RESPONSE)
            .create_async()
            .await
    };

    let config = ClientConfig::azure(TEST_TOKEN, &fixture.base_url).with_deployment("gpt-3.5-turbo", "chat-prod");
    let client = Client::with_config(config).unwrap();
    client.create_chat_completion(&chat_request()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_streaming_chat_request_is_rejected() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreached("POST", "/chat/completions").await;

    let mut req = chat_request();
    req.stream = Some(true);
    let err = fixture.client().create_chat_completion(&req).await.unwrap_err();
    assert!(matches!(err, Error::Request { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "POST",
            "/completions",
            200,
            r#"{"id":"cmpl-1","object":"text_completion","created":1,"model":"gpt-3.5-turbo-instruct",
                "choices":[{"text":" world","index":0,"finish_reason":"length"}],
                "usage":{"prompt_tokens":1,"completion_tokens":1,"total_tokens":2}}"#,
        )
        .await;

    let resp = fixture
        .client()
        .create_completion(&CompletionRequest::new("gpt-3.5-turbo-instruct", "hello"))
        .await
        .unwrap();
    assert_eq!(resp.choices[0].text, " world");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embeddings_on_azure_ad() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/openai/deployments/text-embedding-ada-002/embeddings")
            .match_query(Matcher::UrlEncoded("api-version".into(), "2024-02-01".into()))
            .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
            .with_status(200)
            .with_body(
                r#"{"object":"list","data":[{"object":"embedding","embedding":[0.1,0.2],"index":0}],
                    "model":"text-embedding-ada-002","usage":{"prompt_tokens":2,"total_tokens":2}}"#,
            )
            .create_async()
            .await
    };

    let config = ClientConfig::azure(TEST_TOKEN, &fixture.base_url)
        .with_api_type(oai_client::ApiType::AzureAd)
        .with_api_version("2024-02-01");
    let client = Client::with_config(config).unwrap();
    let resp = client
        .create_embeddings(&EmbeddingRequest::single("text-embedding-ada-002", "hi"))
        .await
        .unwrap();
    assert_eq!(resp.data[0].embedding, vec![0.1, 0.2]);
    mock.assert_async().await;
}
