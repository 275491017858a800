//! Batch file upload and batch job lifecycle

use crate::mock_server::{MockServerFixture, BATCH_JSON, FILE_JSON};
use mockito::Matcher;
use oai_client::batch::{
    BatchEndpoint, CreateBatchRequest, CreateBatchWithUploadFileRequest, UploadBatchFileRequest,
};
use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
use oai_client::Error;
use serde_json::json;

fn upload_request() -> UploadBatchFileRequest {
    let mut upload = UploadBatchFileRequest::new();
    for id in ["req-1", "req-2"] {
        upload.add_chat_completion(
            id,
            ChatCompletionRequest::new("gpt-3.5-turbo", vec![ChatCompletionMessage::user("Hello!")]),
        );
    }
    upload
}

#[tokio::test]
async fn test_upload_batch_file_uses_default_name() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/files")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"filename="@batchinput.jsonl""#.into()),
                Matcher::Regex(r#"name="purpose"\r\n\r\nbatch"#.into()),
                Matcher::Regex(r#""custom_id":"req-1""#.into()),
                Matcher::Regex(r#""custom_id":"req-2""#.into()),
            ]))
            .with_status(200)
            .with_body(FILE_JSON)
            .create_async()
            .await
    };

    let file = fixture.client().upload_batch_file(&upload_request()).await.unwrap();
    assert_eq!(file.id, "file-abc123");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_batch_file_keeps_given_name() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/files")
            .match_body(Matcher::Regex(r#"filename="nightly.jsonl""#.into()))
            .with_status(200)
            .with_body(FILE_JSON)
            .create_async()
            .await
    };

    fixture
        .client()
        .upload_batch_file(&upload_request().with_file_name("nightly.jsonl"))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_batch_defaults_completion_window() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/batches")
            .match_body(Matcher::Json(json!({
                "input_file_id": "file-abc123",
                "endpoint": "/v1/chat/completions",
                "completion_window": "24h"
            })))
            .with_status(200)
            .with_body(BATCH_JSON)
            .create_async()
            .await
    };

    let mut request = CreateBatchRequest::new("file-abc123", BatchEndpoint::ChatCompletions);
    request.completion_window.clear();
    let batch = fixture.client().create_batch(&request).await.unwrap();
    assert_eq!(batch.id, "batch_abc123");
    assert_eq!(batch.status, "validating");
    assert_eq!(batch.metadata.unwrap()["customer_id"], "user_123");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_batch_with_upload_file() {
    let fixture = MockServerFixture::new().await;
    let upload = fixture.mock_json("POST", "/files", 200, FILE_JSON).await;
    let create = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/batches")
            .match_body(Matcher::PartialJson(json!({
                "input_file_id": "file-abc123",
                "endpoint": "/v1/chat/completions",
                "completion_window": "24h",
                "metadata": {"customer_id": "user_123"}
            })))
            .with_status(200)
            .with_body(BATCH_JSON)
            .create_async()
            .await
    };

    let mut request = CreateBatchWithUploadFileRequest::new(BatchEndpoint::ChatCompletions, upload_request());
    request.metadata = Some([("customer_id".to_string(), json!("user_123"))].into_iter().collect());
    let batch = fixture.client().create_batch_with_upload_file(&request).await.unwrap();
    assert_eq!(batch.input_file_id, "file-abc123");

    upload.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_failed_upload_creates_no_batch() {
    let fixture = MockServerFixture::new().await;
    let _upload = fixture
        .mock_json(
            "POST",
            "/files",
            400,
            r#"{"error":{"message":"invalid file","type":"invalid_request_error"}}"#,
        )
        .await;
    let create = fixture.mock_unreached("POST", "/batches").await;

    let request = CreateBatchWithUploadFileRequest::new(BatchEndpoint::ChatCompletions, upload_request());
    let err = fixture.client().create_batch_with_upload_file(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(matches!(err, Error::Api { .. }));
    create.assert_async().await;
}

#[tokio::test]
async fn test_retrieve_and_cancel_batch() {
    let fixture = MockServerFixture::new().await;
    let retrieve = fixture.mock_json("GET", "/batches/batch_abc123", 200, BATCH_JSON).await;
    let cancelling = BATCH_JSON.replace(r#""status": "validating""#, r#""status": "cancelling""#);
    let cancel = fixture
        .mock_json("POST", "/batches/batch_abc123/cancel", 200, &cancelling)
        .await;

    let client = fixture.client();
    let batch = client.retrieve_batch("batch_abc123").await.unwrap();
    assert_eq!(batch.endpoint, "/v1/chat/completions");
    assert!(!batch.is_terminal());
    let batch = client.cancel_batch("batch_abc123").await.unwrap();
    assert_eq!(batch.status, "cancelling");

    retrieve.assert_async().await;
    cancel.assert_async().await;
}

#[tokio::test]
async fn test_list_batch_pagination_query() {
    let fixture = MockServerFixture::new().await;
    let body = format!(
        r#"{{"object":"list","data":[{}],"first_id":"batch_abc123","last_id":"batch_abc123","has_more":true}}"#,
        BATCH_JSON
    );
    let mock = fixture
        .mock_json_with_query(
            "GET",
            "/batches",
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("after".into(), "batch_abc000".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]),
            &body,
        )
        .await;

    let page = fixture
        .client()
        .list_batch(Some("batch_abc000"), Some(10))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(page.has_more);
    assert_eq!(page.last_id.as_deref(), Some("batch_abc123"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_batch_without_paging() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json("GET", "/batches", 200, r#"{"object":"list","data":[],"has_more":false}"#)
        .await;

    let page = fixture.client().list_batch(None, None).await.unwrap();
    assert!(page.data.is_empty());
    mock.assert_async().await;
}
