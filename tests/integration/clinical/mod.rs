//! Clinical endpoint integration tests
//!
//! - POST /api/ai/chat
//! - POST /api/ai/analyze-vitals
//! - POST /api/ai/summarize-case
//! - POST /api/ai/emergency-triage
//! - POST /api/ai/check-medications

use axum::http::StatusCode;
use serde_json::json;

use virtudoc_llm::{mock::MockLlmService, LlmRole};

use crate::common::{assertions, TestApp};

mod test_chat {
    use super::*;

    #[tokio::test]
    async fn test_headache_question_gets_mock_reply() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/chat",
                json!({
                    "message": "I have a headache",
                    "patient_id": "patient-123",
                    "session_id": "session-1"
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert!(!body["response_text"].as_str().unwrap().is_empty());
        assert_eq!(body["confidence"], 0.75);
        assert_eq!(body["requires_escalation"], true);
        assert_eq!(body["session_id"], "session-1");
        assert_eq!(body["suggested_actions"].as_array().unwrap().len(), 3);
        assert_eq!(app.llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_conversation_history_precedes_prompt() {
        let app = TestApp::new();

        let (status, _) = app
            .post_json(
                "/api/ai/chat",
                json!({
                    "message": "It is worse today",
                    "patient_id": "patient-123",
                    "conversation_history": [
                        {"role": "user", "content": "My knee hurts"},
                        {"role": "assistant", "content": "How long has it hurt?"}
                    ]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let requests = app.llm.recorded_requests();
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "My knee hurts");
        assert_eq!(messages[1].role, LlmRole::Assistant);
        assert!(messages[2].content.contains("It is worse today"));
        assert_eq!(requests[0].task.as_deref(), Some("patient_chat"));
    }

    #[tokio::test]
    async fn test_blank_message_rejected_before_vendor() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/chat",
                json!({"message": "   ", "patient_id": "patient-123"}),
            )
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected_before_vendor() {
        let app = TestApp::new();

        let (status, body) = app.post_raw("/api/ai/chat", "{\"message\": ").await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }
}

mod test_vitals {
    use super::*;

    #[tokio::test]
    async fn test_normal_vitals_are_low_risk() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/analyze-vitals",
                json!({
                    "patient_id": "patient-123",
                    "vitals": {
                        "bp_systolic": 120,
                        "bp_diastolic": 80,
                        "heart_rate": 72,
                        "oxygen_saturation": 98,
                        "temperature": 98.6
                    }
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["risk_level"], "low");
        assert_eq!(body["urgency"], "routine");
        assert_eq!(body["vitals_summary"]["blood_pressure"], "120/80");
        assert_eq!(body["recommendations"][0], "Continue monitoring");
    }

    #[tokio::test]
    async fn test_low_oxygen_is_high_risk() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/analyze-vitals",
                json!({
                    "patient_id": "patient-123",
                    "vitals": {"oxygen_saturation": 91, "heart_rate": 110}
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["risk_level"], "high");
        assert_eq!(body["urgency"], "urgent");
        assert_eq!(body["flags"].as_array().unwrap().len(), 2);
        assert_eq!(body["recommendations"][0], "Escalate to doctor");
    }

    #[tokio::test]
    async fn test_empty_vitals_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/analyze-vitals",
                json!({"patient_id": "patient-123", "vitals": {}}),
            )
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }
}

mod test_case_summary {
    use super::*;

    #[tokio::test]
    async fn test_structured_case_is_summarized() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/summarize-case",
                json!({
                    "patient_id": "patient-123",
                    "case_data": {
                        "chief_complaint": "Chest pain on exertion",
                        "symptoms": ["chest pain", "shortness of breath"],
                        "vitals": {"bp_systolic": 150},
                        "medications": ["aspirin"]
                    }
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert!(!body["summary"].as_str().unwrap().is_empty());
        assert_eq!(body["key_symptoms"][0], "chest pain");
        assert!(body["red_flags"]
            .as_array()
            .unwrap()
            .iter()
            .any(|flag| flag.as_str().unwrap().contains("chest pain")));

        let requests = app.llm.recorded_requests();
        assert_eq!(requests[0].max_tokens, Some(1500));
    }

    #[tokio::test]
    async fn test_case_without_complaint_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/summarize-case",
                json!({"case_data": {"duration": "2 days"}}),
            )
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }
}

mod test_triage {
    use super::*;

    #[tokio::test]
    async fn test_chest_pain_is_emergency_regardless_of_model() {
        let llm = MockLlmService::recording()
            .with_reply("emergency_triage", "This looks mild, rest at home.");
        let app = TestApp::with_llm(llm);

        let (status, body) = app
            .post_json(
                "/api/ai/emergency-triage",
                json!({"symptoms": "Crushing chest pain and sweating"}),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["urgency_level"], "emergency");
        assert_eq!(body["call_emergency"], true);
        assert_eq!(body["analysis"], "This looks mild, rest at home.");
        assert_eq!(
            body["immediate_actions"][0],
            "Call emergency services immediately"
        );
    }

    #[tokio::test]
    async fn test_minor_symptoms_are_low() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/emergency-triage",
                json!({
                    "symptoms": "runny nose",
                    "vitals": {"heart_rate": 70, "oxygen_saturation": 99}
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert_eq!(body["urgency_level"], "low");
        assert_eq!(body["call_emergency"], false);
    }
}

mod test_medications {
    use super::*;

    #[tokio::test]
    async fn test_interaction_check_uses_llm() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/check-medications",
                json!({
                    "current_medications": ["warfarin", "metformin"],
                    "new_medication": "ibuprofen"
                }),
            )
            .await;

        assertions::assert_mock_success(status, &body);
        assert!(!body["analysis"].as_str().unwrap().is_empty());

        let prompt = &app.llm.recorded_requests()[0].messages[0].content;
        assert!(prompt.contains("warfarin"));
        assert!(prompt.contains("ibuprofen"));
    }

    #[tokio::test]
    async fn test_empty_medication_list_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/api/ai/check-medications",
                json!({"current_medications": [], "new_medication": "ibuprofen"}),
            )
            .await;

        assertions::assert_error(status, &body, StatusCode::BAD_REQUEST, "ValidationError");
        assert_eq!(app.vendor_calls(), 0);
    }
}
