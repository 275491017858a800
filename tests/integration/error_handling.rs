//! Error classification: transport, decode, API and remote failures, and cancellation

use crate::mock_server::{MockServerFixture, TEST_TOKEN};
use async_trait::async_trait;
use oai_client::transport::{HttpResponse, Transport, TransportError};
use oai_client::{Client, ClientConfig, Error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Transport that answers successfully, but only after `delay`.
struct SlowTransport {
    delay: Duration,
    finished: AtomicBool,
}

#[async_trait]
impl Transport for SlowTransport {
    async fn execute(&self, _request: reqwest::Request) -> Result<HttpResponse, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(HttpResponse {
            status: reqwest::StatusCode::OK,
            headers: reqwest::header::HeaderMap::new(),
            body: bytes::Bytes::from_static(br#"{"data":[]}"#),
        })
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_remote_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_text("GET", "/engines", 502, "upstream connect error")
        .await;

    let err = fixture.client().list_engines().await.unwrap_err();
    match err {
        Error::Remote { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream connect error");
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_without_error_field_is_remote_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("GET", "/engines", 500, r#"{"detail":"boom"}"#)
        .await;

    let err = fixture.client().list_engines().await.unwrap_err();
    assert!(matches!(err, Error::Remote { status: 500, .. }));
}

#[tokio::test]
async fn test_undecodable_success_body_is_decode_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_text("GET", "/engines", 200, "not json").await;

    let err = fixture.client().list_engines().await.unwrap_err();
    assert!(err.is_decode());
    assert!(!err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on port 9 locally.
    let config = ClientConfig::new(TEST_TOKEN).with_base_url("http://127.0.0.1:9");
    let client = Client::with_config(config).unwrap();

    let err = client.list_engines().await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, Error::Transport(TransportError::Http(_))));
}

#[tokio::test]
async fn test_cancelled_token_stops_request() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreached("GET", "/engines").await;

    let token = CancellationToken::new();
    token.cancel();
    let client = fixture.client().with_cancellation(token);

    let err = client.list_engines().await.unwrap_err();
    assert!(err.is_cancelled());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancel_during_in_flight_request() {
    let transport = Arc::new(SlowTransport {
        delay: Duration::from_secs(5),
        finished: AtomicBool::new(false),
    });
    let client = Client::builder(ClientConfig::new(TEST_TOKEN))
        .transport(transport.clone())
        .build()
        .unwrap();

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let err = client.with_cancellation(token).list_engines().await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(!transport.finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_uncancelled_token_lets_request_finish() {
    let transport = Arc::new(SlowTransport {
        delay: Duration::from_millis(10),
        finished: AtomicBool::new(false),
    });
    let client = Client::builder(ClientConfig::new(TEST_TOKEN))
        .transport(transport.clone())
        .build()
        .unwrap();

    let engines = client
        .with_cancellation(CancellationToken::new())
        .list_engines()
        .await
        .unwrap();
    assert!(engines.data.is_empty());
    assert!(transport.finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_cancellation_is_per_handle() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json("GET", "/engines", 200, r#"{"data":[]}"#)
        .await;

    let base = fixture.client();
    let token = CancellationToken::new();
    let _cancellable = base.with_cancellation(token.clone());
    token.cancel();

    base.list_engines().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_base_url_is_url_error() {
    let client = Client::with_config(ClientConfig::new(TEST_TOKEN).with_base_url("not a url")).unwrap();
    let err = client.list_engines().await.unwrap_err();
    assert!(matches!(err, Error::Url { .. }));
}
