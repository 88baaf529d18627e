//! Common test utilities for integration tests
//!
//! Builds the assistant router over mock vendor clients whose call history
//! stays inspectable from the test.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use virtudoc_assistant::{routes, AssistantService, AssistantState};
use virtudoc_common::ServiceMode;
use virtudoc_llm::mock::MockLlmService;
use virtudoc_tts::mock::MockSpeechService;
use virtudoc_video::mock::MockVideoService;
use virtudoc_vision::mock::MockVisionService;

/// 1x1 transparent PNG
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Router plus handles on every mock vendor
pub struct TestApp {
    pub llm: MockLlmService,
    pub speech: MockSpeechService,
    pub video: MockVideoService,
    pub vision: MockVisionService,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_llm(MockLlmService::recording())
    }

    pub fn with_llm(llm: MockLlmService) -> Self {
        let speech = MockSpeechService::recording();
        let video = MockVideoService::recording();
        let vision = MockVisionService::recording();

        let service = AssistantService::new(
            Arc::new(llm.clone()),
            Arc::new(speech.clone()),
            Arc::new(video.clone()),
            Arc::new(vision.clone()),
        );
        let router = routes().with_state(AssistantState::new(service, ServiceMode::Mock));

        Self {
            llm,
            speech,
            video,
            vision,
            router,
        }
    }

    /// Total vendor calls across all mocks
    pub fn vendor_calls(&self) -> usize {
        self.llm.call_count()
            + self.speech.recorded_requests().len()
            + self.video.recorded_requests().len()
            + self.vision.recorded_analysis_types().len()
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(&self.router, request).await
    }

    pub async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(&self.router, request).await
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_body(response.into_body()).await)
}

pub async fn parse_body(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Common response assertions
pub mod assertions {
    use super::*;

    /// Success envelope produced by a mock vendor
    pub fn assert_mock_success(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
        assert_eq!(body["success"], true);
        assert_eq!(body["service_used"], "mock");
        assert!(body["timestamp"].is_string());
    }

    /// Error envelope with the given code
    pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, code: &str) {
        assert_eq!(status, expected, "unexpected body: {}", body);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], code);
        assert!(body["error"]["message"].is_string());
        assert!(body["timestamp"].is_string());
    }
}
