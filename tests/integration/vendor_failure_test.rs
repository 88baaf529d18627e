//! Real-mode vendor failure integration tests
//!
//! Every vendor endpoint points at a local wiremock server, so failures are
//! reported through the error envelope instead of being replaced by canned
//! output.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use virtudoc_app::create_app;
use virtudoc_common::{Config, Credential, ServiceMode, Vendor, VendorEndpoints};

mod common;

fn real_config(server: &MockServer, vendor_timeout: Duration) -> Config {
    let mut credentials = BTreeMap::new();
    credentials.insert(Vendor::Claude, Credential::ApiKey("sk-ant-test".to_string()));
    credentials.insert(Vendor::ElevenLabs, Credential::ApiKey("el-test".to_string()));
    credentials.insert(Vendor::Tavus, Credential::ApiKey("tavus-test".to_string()));
    credentials.insert(
        Vendor::Rekognition,
        Credential::AwsKeys {
            access_key_id: "AKIATEST".to_string(),
            secret_access_key: "secret".to_string(),
        },
    );

    Config {
        mode: ServiceMode::Real,
        credentials,
        endpoints: VendorEndpoints {
            anthropic_base_url: server.uri(),
            elevenlabs_base_url: server.uri(),
            tavus_base_url: server.uri(),
            aws_endpoint_url: Some(server.uri()),
            ..VendorEndpoints::default()
        },
        vendor_timeout,
        port: 0,
        cors_allowed_origins: None,
    }
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    common::send(app, request).await
}

fn chat_body() -> Value {
    json!({"message": "I have a headache", "patient_id": "patient-123"})
}

#[test_log::test(tokio::test)]
async fn test_slow_llm_returns_gateway_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "content": [{"type": "text", "text": "late"}],
                    "model": "claude-test",
                    "usage": {"input_tokens": 1, "output_tokens": 1}
                }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let app = create_app(real_config(&server, Duration::from_millis(200)))
        .await
        .unwrap();

    let (status, body) = post(&app, "/api/ai/chat", chat_body()).await;

    common::assertions::assert_error(status, &body, StatusCode::GATEWAY_TIMEOUT, "VendorTimeout");
}

#[tokio::test]
async fn test_llm_server_error_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(real_config(&server, Duration::from_secs(5)))
        .await
        .unwrap();

    let (status, body) = post(&app, "/api/ai/chat", chat_body()).await;

    common::assertions::assert_error(status, &body, StatusCode::BAD_GATEWAY, "VendorUnavailable");
    assert!(!body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("overloaded"));
}

#[tokio::test]
async fn test_real_mode_health_reports_available() {
    let server = MockServer::start().await;
    let config = real_config(&server, Duration::from_secs(5));
    let app = tokio_test::assert_ok!(create_app(config).await);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/ai/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = common::send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "real");
    assert_eq!(body["services"]["claude"], "available");
}

#[tokio::test]
async fn test_missing_credential_aborts_startup() {
    let server = MockServer::start().await;
    let mut config = real_config(&server, Duration::from_secs(5));
    config.credentials.remove(&Vendor::Tavus);

    let err = tokio_test::assert_err!(create_app(config).await);

    assert!(err.to_string().contains("tavus"));
}
