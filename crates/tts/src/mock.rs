//! Mock Speech Service Implementation
//!
//! Returns a placeholder audio URL instead of synthesized bytes. The
//! recording variant keeps every request for test assertions.

use std::sync::{Arc, Mutex};

use uuid::Uuid;
use virtudoc_common::VendorError;

use crate::{SpeechAudio, SpeechRequest, SpeechService, Voice};

const MOCK_AUDIO_BASE_URL: &str = "https://mock-audio.virtudoc.local/audio";

/// Mock speech service
#[derive(Debug, Clone, Default)]
pub struct MockSpeechService {
    history: Option<Arc<Mutex<Vec<SpeechRequest>>>>,
}

impl MockSpeechService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording() -> Self {
        Self {
            history: Some(Arc::default()),
        }
    }

    /// Requests received so far; always empty unless recording
    pub fn recorded_requests(&self) -> Vec<SpeechRequest> {
        match &self.history {
            Some(history) => history.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            None => Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl SpeechService for MockSpeechService {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, VendorError> {
        tracing::info!(text_length = request.text.len(), "Mock speech: synthesizing");

        // Echo the caller's voice choice rather than the vendor default
        let voice_id = request
            .voice_id
            .clone()
            .unwrap_or_else(|| "default".to_string());

        if let Some(history) = &self.history {
            history.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        }

        Ok(SpeechAudio {
            audio: None,
            audio_url: Some(format!("{}/{}.mp3", MOCK_AUDIO_BASE_URL, Uuid::new_v4())),
            content_type: "audio/mpeg".to_string(),
            voice_id,
        })
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, VendorError> {
        Ok(vec![
            Voice {
                voice_id: crate::DEFAULT_VOICE_ID.to_string(),
                name: "Rachel".to_string(),
                category: Some("premade".to_string()),
            },
            Voice {
                voice_id: "AZnzlk1XvdvUeBnXmlld".to_string(),
                name: "Domi".to_string(),
                category: Some("premade".to_string()),
            },
            Voice {
                voice_id: "EXAVITQu4vr4xnSDxMaL".to_string(),
                name: "Bella".to_string(),
                category: Some("premade".to_string()),
            },
        ])
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}
