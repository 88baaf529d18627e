//! ElevenLabs Text-to-Speech Implementation
//!
//! Calls `POST {base_url}/v1/text-to-speech/{voice_id}` and returns the MP3
//! bytes, and `GET {base_url}/v1/voices` for the catalogue.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use virtudoc_common::{Vendor, VendorError};

use crate::{SpeechAudio, SpeechConfig, SpeechRequest, SpeechService, Voice};

const MODEL_ID: &str = "eleven_monolingual_v1";
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

/// ElevenLabs speech service implementation
pub struct ElevenLabsService {
    client: Client,
    config: SpeechConfig,
}

impl ElevenLabsService {
    pub fn new(config: SpeechConfig) -> Result<Self, VendorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VendorError::unavailable(Vendor::ElevenLabs, e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl SpeechService for ElevenLabsService {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, VendorError> {
        let voice_id = request.resolved_voice_id().to_string();
        let url = self.url(&format!("/v1/text-to-speech/{}", voice_id));

        let body = SynthesisBody {
            text: &request.text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.5,
            },
        };

        tracing::debug!(voice_id = %voice_id, text_length = request.text.len(), "Sending ElevenLabs synthesis request");

        let response = self
            .client
            .post(&url)
            .header("Accept", AUDIO_CONTENT_TYPE)
            .header("xi-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::ElevenLabs, e))?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(Vendor::ElevenLabs, response).await);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(AUDIO_CONTENT_TYPE)
            .to_string();

        if !content_type.starts_with("audio/") {
            return Err(VendorError::malformed(
                Vendor::ElevenLabs,
                format!("expected audio, got {}", content_type),
            ));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::ElevenLabs, e))?;

        if audio.is_empty() {
            return Err(VendorError::malformed(
                Vendor::ElevenLabs,
                "empty audio body",
            ));
        }

        Ok(SpeechAudio {
            audio: Some(audio.to_vec()),
            audio_url: None,
            content_type,
            voice_id,
        })
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, VendorError> {
        let response = self
            .client
            .get(self.url("/v1/voices"))
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::ElevenLabs, e))?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(Vendor::ElevenLabs, response).await);
        }

        let voices: VoicesResponse = response
            .json()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::ElevenLabs, e))?;

        Ok(voices.voices)
    }

    fn service_name(&self) -> &'static str {
        Vendor::ElevenLabs.as_str()
    }
}
