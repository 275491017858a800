//! File upload and management

use crate::mock_server::{MockServerFixture, FILE_JSON};
use mockito::Matcher;
use oai_client::files::{FileBytesRequest, FilePurpose};
use oai_client::Error;

#[tokio::test]
async fn test_create_file_bytes_sends_multipart() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/files")
            .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="purpose"\r\n\r\nbatch"#.into()),
                Matcher::Regex(r#"name="file"; filename="input.jsonl""#.into()),
                Matcher::Regex("hello bytes".into()),
            ]))
            .with_status(200)
            .with_body(FILE_JSON)
            .create_async()
            .await
    };

    let file = fixture
        .client()
        .create_file_bytes(FileBytesRequest {
            name: "input.jsonl".into(),
            bytes: b"hello bytes".to_vec(),
            purpose: FilePurpose::Batch,
        })
        .await
        .unwrap();
    assert_eq!(file.id, "file-abc123");
    assert_eq!(file.purpose, "batch");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_file_bytes_rejects_empty_name() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreached("POST", "/files").await;

    let err = fixture
        .client()
        .create_file_bytes(FileBytesRequest {
            name: String::new(),
            bytes: vec![1, 2, 3],
            purpose: FilePurpose::Batch,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_get_delete_files() {
    let fixture = MockServerFixture::new().await;
    let list = fixture
        .mock_json(
            "GET",
            "/files",
            200,
            &format!(r#"{{"object":"list","data":[{}]}}"#, FILE_JSON),
        )
        .await;
    let get = fixture.mock_json("GET", "/files/file-abc123", 200, FILE_JSON).await;
    let delete = fixture
        .mock_json(
            "DELETE",
            "/files/file-abc123",
            200,
            r#"{"id":"file-abc123","object":"file","deleted":true}"#,
        )
        .await;

    let client = fixture.client();
    assert_eq!(client.list_files().await.unwrap().data.len(), 1);
    assert_eq!(client.get_file("file-abc123").await.unwrap().bytes, 140);
    assert!(client.delete_file("file-abc123").await.unwrap().deleted);

    list.assert_async().await;
    get.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_get_file_content_is_raw() {
    let fixture = MockServerFixture::new().await;
    let output = "{\"id\":\"batch_req_1\",\"custom_id\":\"req-1\"}\n{\"id\":\"batch_req_2\",\"custom_id\":\"req-2\"}\n";
    let _mock = fixture
        .mock_text("GET", "/files/file-out/content", 200, output)
        .await;

    let content = fixture.client().get_file_content("file-out").await.unwrap();
    assert_eq!(&content[..], output.as_bytes());
}
