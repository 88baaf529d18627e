//! Media endpoint integration tests
//!
//! - POST /api/ai/generate-tts
//! - GET /api/ai/voices
//! - POST /api/ai/create-video-summary
//! - GET /api/ai/video-status/{video_id}
//! - POST /api/ai/analyze-image

use axum::http::StatusCode;
use serde_json::json;

use virtudoc_vision::AnalysisType;

use crate::common::{assertions, TestApp, TINY_PNG_BASE64};

mod test_speech {
    use super::*;

    #[tokio::test]
    async fn test_generate_tts_returns_placeholder_audio() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/generate-tts",
                json!({"text": "Take one tablet twice a day.", "voice_id": "calm-voice"}),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert!(body["audio_url"]
            .as_str()
            .unwrap()
            .starts_with("https://mock-audio.virtudoc.local/audio/"));
        assert_eq!(body["voice_id"], "calm-voice");
        assert_eq!(body["text_length"], 28);
        assert_eq!(body["duration_seconds"], 2.8);
        assert_eq!(app.speech.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_text_rejected() {
        let app = TestApp::new();
        let text = "a".repeat(5001);

        let (status, body) = app
            .post_json("/api/ai/generate-tts", json!({ "text": text }))
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }

    #[tokio::test]
    async fn test_voice_id_with_path_characters_rejected() {
        let app = TestApp::new();

        for voice_id in ["../user/subscription", "voice/../../v1/history", "a b"] {
            let (status, body) = app
                .post_json(
                    "/api/ai/generate-tts",
                    json!({"text": "Hello", "voice_id": voice_id}),
                )
                .await;

            assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        }
        assert_eq!(app.vendor_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json("/api/ai/generate-tts", json!({"text": "   "}))
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }

    #[tokio::test]
    async fn test_list_voices() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/ai/voices").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["service_used"], "mock");
        assert_eq!(body["voices"].as_array().unwrap().len(), 3);
    }
}

mod test_video {
    use super::*;

    #[tokio::test]
    async fn test_supplied_script_skips_llm() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/create-video-summary",
                json!({
                    "patient_id": "patient-123",
                    "script": "Hello Sam, here is your plan.",
                    "patient_name": "Sam"
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["script"], "Hello Sam, here is your plan.");
        assert_eq!(body["patient_name"], "Sam");
        assert_eq!(body["doctor_name"], "your doctor");
        assert_eq!(body["status"], "ready");
        assert_eq!(app.llm.call_count(), 0);
        assert_eq!(
            app.video.recorded_requests()[0].script,
            "Hello Sam, here is your plan."
        );
    }

    #[tokio::test]
    async fn test_diagnosis_only_generates_script() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/create-video-summary",
                json!({
                    "patient_id": "patient-123",
                    "diagnosis": "Seasonal allergies",
                    "treatment_plan": "Daily antihistamine"
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(app.llm.call_count(), 1);
        assert_eq!(
            app.llm.recorded_requests()[0].task.as_deref(),
            Some("video_script")
        );
        assert!(!body["script"].as_str().unwrap().is_empty());
        assert!(body["video_id"].as_str().unwrap().starts_with("mock-"));
    }

    #[tokio::test]
    async fn test_missing_script_and_diagnosis_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/create-video-summary",
                json!({"patient_id": "patient-123"}),
            )
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }

    #[tokio::test]
    async fn test_video_status_echoes_id() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/ai/video-status/mock-abc123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["video_id"], "mock-abc123");
        assert_eq!(body["service_used"], "mock");
    }

    #[tokio::test]
    async fn test_video_status_rejects_odd_id() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/ai/video-status/abc.def").await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }
}

mod test_image {
    use super::*;

    #[tokio::test]
    async fn test_skin_analysis() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/analyze-image",
                json!({
                    "patient_id": "patient-123",
                    "image_data": TINY_PNG_BASE64,
                    "analysis_type": "skin"
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["analysis_type"], "skin");
        assert_eq!(body["confidence"], 0.8);
        assert_eq!(body["findings"][0], "Skin lesion appears benign");
        assert_eq!(app.vision.recorded_analysis_types(), vec![AnalysisType::Skin]);
    }

    #[tokio::test]
    async fn test_data_url_defaults_to_general() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/analyze-image",
                json!({
                    "patient_id": "patient-123",
                    "image_data": format!("data:image/png;base64,{}", TINY_PNG_BASE64)
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["analysis_type"], "general");
    }

    #[tokio::test]
    async fn test_invalid_base64_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/analyze-image",
                json!({"patient_id": "patient-123", "image_data": "not base64!!"}),
            )
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }
}
