//! Route definitions for Assistant domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{clinical, health, media};
use super::middleware::AssistantState;

/// Prompt-driven clinical routes
fn clinical_routes() -> Router<AssistantState> {
    Router::new()
        .route("/api/ai/chat", post(clinical::chat))
        .route("/api/ai/analyze-vitals", post(clinical::analyze_vitals))
        .route("/api/ai/summarize-case", post(clinical::summarize_case))
        .route("/api/ai/emergency-triage", post(clinical::emergency_triage))
        .route("/api/ai/check-medications", post(clinical::check_medications))
}

/// Speech, video and image routes
fn media_routes() -> Router<AssistantState> {
    Router::new()
        .route("/api/ai/generate-tts", post(media::generate_tts))
        .route("/api/ai/voices", get(media::list_voices))
        .route("/api/ai/create-video-summary", post(media::create_video_summary))
        .route("/api/ai/video-status/{video_id}", get(media::video_status))
        .route("/api/ai/analyze-image", post(media::analyze_image))
}

/// Create all Assistant domain API routes
pub fn routes() -> Router<AssistantState> {
    Router::new()
        .route("/api/ai/health", get(health::health))
        .merge(clinical_routes())
        .merge(media_routes())
}
