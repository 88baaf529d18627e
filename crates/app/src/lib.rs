//! VirtuDoc application composition root
//!
//! Builds the vendor clients once from [`Config`] and mounts the assistant
//! routes on a single router.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use virtudoc_assistant::{AssistantService, AssistantState};
use virtudoc_common::Config;

/// Base64 images make request bodies large
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the main application router with all routes
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    tracing::info!(mode = config.mode.as_str(), "Building vendor clients");

    let service = AssistantService::from_config(&config).await?;
    let state = AssistantState::new(service, config.mode);

    let app = Router::new()
        .route(
            "/",
            axum::routing::get(|| async {
                concat!("VirtuDoc AI Gateway v", env!("CARGO_PKG_VERSION"))
            }),
        )
        .merge(virtudoc_assistant::routes().with_state(state));

    Ok(app)
}

/// CORS layer for a comma-separated origin list; `*` allows any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    if origins.split(',').any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use virtudoc_common::{Credential, ServiceMode, Vendor};

    #[tokio::test]
    async fn test_create_app_in_mock_mode() {
        let app = create_app(Config::mock()).await.unwrap();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_app_fails_without_credentials() {
        let mut config = Config::mock();
        config.mode = ServiceMode::Real;
        config
            .credentials
            .insert(Vendor::Claude, Credential::ApiKey("sk-test".to_string()));

        let err = create_app(config).await.unwrap_err();
        assert!(err.to_string().contains("credential is not configured"));
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin() {
        let app = Router::new()
            .route("/", axum::routing::get(|| async { "ok" }))
            .layer(build_cors_layer("https://app.virtudoc.io, https://admin.virtudoc.io"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://admin.virtudoc.io")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://admin.virtudoc.io"
        );
    }

    #[tokio::test]
    async fn test_body_limit_rejects_oversized_payload() {
        let app = create_app(Config::mock())
            .await
            .unwrap()
            .layer(body_limit_layer());

        let oversized = format!(
            r#"{{"patient_id":"p1","image_data":"{}"}}"#,
            "A".repeat(MAX_BODY_BYTES + 1)
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/analyze-image")
                    .header("content-type", "application/json")
                    .body(Body::from(oversized))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
    }
}
