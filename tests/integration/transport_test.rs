//! HTTP transport against the fake backend

use std::net::TcpListener;

use habityzer::adapters::HttpTransport;
use habityzer::config::Config;
use habityzer::core::ports::{Method, Transport, TransportError};
use serde_json::{Value, json};

use crate::common::fake_api::FakeApi;
use crate::common::fixtures::{TOKEN, task_json, test_config};

fn transport(api: &FakeApi) -> HttpTransport {
    HttpTransport::new(&test_config(api.base_url())).unwrap()
}

#[test]
fn test_base_url_comes_from_config() {
    let config = Config::new("https://api.test/api/", TOKEN);
    assert_eq!(HttpTransport::new(&config).unwrap().base_url(), "https://api.test/api");
}

// =============================================================================
// HEADERS
// =============================================================================

#[tokio::test]
async fn test_get_sends_auth_and_accept() {
    let api = FakeApi::start();
    transport(&api).request(Method::Get, "/tasks?page=1", None).await.unwrap();

    let request = api.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "/api/tasks?page=1");
    assert_eq!(request.header("Authorization"), Some(format!("Bearer {TOKEN}").as_str()));
    assert_eq!(request.header("Accept"), Some("application/ld+json"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let api = FakeApi::start();
    let body = json!({ "title": "Write docs" });
    transport(&api).request(Method::Post, "/tasks", Some(&body)).await.unwrap();

    let request = api.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("Content-Length"), Some(request.body.len().to_string().as_str()));
    assert_eq!(request.json(), body);
}

#[tokio::test]
async fn test_patch_uses_merge_patch() {
    let api = FakeApi::with_tasks(vec![task_json(3, "Old")]);
    let body = json!({ "title": "New" });
    let updated = transport(&api).request(Method::Patch, "/tasks/3", Some(&body)).await.unwrap();

    assert_eq!(api.last_request().header("Content-Type"), Some("application/merge-patch+json"));
    assert_eq!(updated["title"], "New");
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let api = FakeApi::start();
    let other = HttpTransport::new(&Config::new(api.base_url(), "nope")).unwrap();

    assert!(transport(&api).request(Method::Get, "/tasks", None).await.is_ok());
    let err = other.request(Method::Get, "/tasks", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

// =============================================================================
// RESPONSE MAPPING
// =============================================================================

#[tokio::test]
async fn test_non_success_status_keeps_body() {
    let api = FakeApi::fixed(500, "boom");
    let err = transport(&api).request(Method::Get, "/tasks/1", None).await.unwrap_err();

    match err {
        TransportError::HttpStatus { code, body } => {
            assert_eq!(code, 500);
            assert_eq!(body, "boom");
        },
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let api = FakeApi::fixed(200, "not json");
    let err = transport(&api).request(Method::Get, "/tasks", None).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let api = FakeApi::fixed(204, "");
    let value = transport(&api).request(Method::Delete, "/tasks/1", None).await.unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = test_config(&format!("http://127.0.0.1:{port}/api"));
    let err = HttpTransport::new(&config)
        .unwrap()
        .request(Method::Get, "/tasks", None)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
    assert_eq!(err.status_code(), None);
}
