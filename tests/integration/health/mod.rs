//! Health endpoint integration tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_reports_mock_mode() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/ai/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "mock");
    for vendor in ["claude", "elevenlabs", "tavus", "rekognition"] {
        assert_eq!(body["services"][vendor], "mock");
    }
    assert_eq!(app.vendor_calls(), 0);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/ai/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
