//! Mock LLM Service Implementation
//!
//! Used by `LlmServiceFactory` in mock mode. Returns canned clinical replies
//! chosen deterministically from the request, never touches the network,
//! and records every request for test assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use virtudoc_common::VendorError;

use crate::{CompletionRequest, CompletionResponse, LlmService};

const MOCK_MODEL: &str = "mock-model";

/// Canned replies per task tag
fn canned_replies(task: &str) -> &'static [&'static str] {
    match task {
        "patient_chat" => &[
            "I understand your concern. Based on what you've described, it's important to monitor your symptoms. If they persist or worsen, please consider consulting with a healthcare professional.",
            "Thank you for sharing this information. While I can provide general guidance, it's always best to speak with a doctor for personalized medical advice.",
            "Your symptoms could be related to several factors. I recommend keeping track of when they occur and any potential triggers. If you're concerned, please reach out to a healthcare provider.",
        ],
        "vitals_analysis" => &[
            "Based on the vitals provided, the readings appear to be within normal ranges. Continue monitoring and maintain healthy lifestyle habits.",
            "Some readings fall outside typical ranges. Consider lifestyle modifications and follow up with a healthcare provider if this persists.",
        ],
        "case_summary" => &[
            "Patient presents with the reported chief complaint. Vital signs and history have been reviewed. Recommend focused examination and targeted investigations before finalizing a diagnosis.",
            "Presentation is consistent with a non-acute process. No immediate red flags identified from the provided information. Recommend follow-up and symptom monitoring.",
        ],
        "video_script" => &[
            "Hello, this is a summary of your recent consultation. Your care team has reviewed your results and put together a plan to help you feel better. Please follow the treatment instructions you were given, and reach out to us if anything changes or you have questions. Take care.",
        ],
        "emergency_triage" => &[
            "Rule-based triage assessment completed. Review the urgency level and immediate actions.",
        ],
        "medication_interaction" => &[
            "No major interactions were identified in the mock analysis. Confirm with a pharmacist before prescribing, and monitor the patient for unexpected side effects.",
        ],
        _ => &[],
    }
}

/// Stable index into a reply table; same input text, same reply
fn pick(text: &str, len: usize) -> usize {
    text.bytes().map(usize::from).sum::<usize>() % len
}

/// Mock LLM service for mock mode and tests.
///
/// Only instances built with [`MockLlmService::recording`] keep a request
/// history; the factory's instance keeps nothing between calls.
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    history: Option<Arc<Mutex<Vec<CompletionRequest>>>>,
    scripted: Arc<Mutex<HashMap<String, String>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that records every request it serves
    pub fn recording() -> Self {
        Self {
            history: Some(Arc::default()),
            ..Self::default()
        }
    }

    /// Override the reply for one task tag
    pub fn with_reply(self, task: &str, reply: &str) -> Self {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(task.to_string(), reply.to_string());
        self
    }

    /// Requests received so far; always empty unless recording
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        match &self.history {
            Some(history) => history.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            None => Vec::new(),
        }
    }

    /// Number of completions recorded
    pub fn call_count(&self) -> usize {
        self.history
            .as_ref()
            .map_or(0, |history| history.lock().unwrap_or_else(|e| e.into_inner()).len())
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VendorError> {
        tracing::info!(task = ?request.task, "Mock LLM service processing completion request");

        let model = if request.model.is_empty() {
            MOCK_MODEL.to_string()
        } else {
            request.model.clone()
        };

        let last_message = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("empty");

        let task = request.task.as_deref().unwrap_or_default();
        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(task)
            .cloned();

        let content = match scripted {
            Some(reply) => reply,
            None => {
                let replies = canned_replies(task);
                if replies.is_empty() {
                    format!("Mock response to: {}", last_message)
                } else {
                    replies[pick(last_message, replies.len())].to_string()
                }
            }
        };

        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as i32 / 4)
            .sum::<i32>();
        let output_tokens = content.len() as i32 / 4;

        if let Some(history) = &self.history {
            history.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        }

        Ok(CompletionResponse {
            content,
            model,
            input_tokens,
            output_tokens,
            stop_reason: "end_turn".to_string(),
        })
    }

    fn default_model(&self) -> &str {
        MOCK_MODEL
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}
