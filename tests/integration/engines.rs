//! Engine listing and API error decoding

use crate::mock_server::MockServerFixture;
use oai_client::client::ORGANIZATION_HEADER;
use oai_client::{Client, Error};

#[tokio::test]
async fn test_list_engines() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            "/engines",
            200,
            r#"{"data":[{"id":"text-davinci-003","object":"engine","owner":"openai","ready":true},
                        {"id":"babbage","object":"engine","owner":"openai","ready":false}]}"#,
        )
        .await;

    let engines = tokio_test::assert_ok!(fixture.client().list_engines().await);
    assert_eq!(engines.data.len(), 2);
    assert_eq!(engines.data[0].id, "text-davinci-003");
    assert!(!engines.data[1].ready);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_engine() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            "/engines/text-davinci-003",
            200,
            r#"{"id":"text-davinci-003","object":"engine","owner":"openai","ready":true}"#,
        )
        .await;

    let engine = fixture.client().get_engine("text-davinci-003").await.unwrap();
    assert_eq!(engine.owner, "openai");
    assert!(engine.ready);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_engine_error_body_becomes_api_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/engines",
            418,
            r#"{"error":{"message":"I'm a teapot","type":"teapot_error","param":null,"code":"teapot"}}"#,
        )
        .await;

    let err = fixture.client().list_engines().await.unwrap_err();
    match err {
        Error::Api { status, error } => {
            assert_eq!(status, 418);
            assert_eq!(error.message, "I'm a teapot");
            assert_eq!(error.error_type, "teapot_error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_organization_header_is_sent() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("GET", "/engines")
            .match_header(ORGANIZATION_HEADER, "org-123")
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await
    };

    let client = Client::with_config(fixture.config().with_org_id("org-123")).unwrap();
    let engines = client.list_engines().await.unwrap();
    assert!(engines.data.is_empty());
    mock.assert_async().await;
}
