//! VirtuDoc Text-to-Speech Service
//!
//! Provides speech synthesis with support for:
//! - ElevenLabs API integration for real mode
//! - Mock speech service returning placeholder audio references
//! - Voice catalogue listing

pub mod elevenlabs;
pub mod mock;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use virtudoc_common::{Config, Credential, Vendor, VendorError};

/// ElevenLabs "Rachel" voice, used when the caller does not pick one
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Text to synthesize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// Vendor voice id; `None` or `"default"` selects [`DEFAULT_VOICE_ID`]
    pub voice_id: Option<String>,
}

impl SpeechRequest {
    /// The voice id to send to the vendor
    pub fn resolved_voice_id(&self) -> &str {
        match self.voice_id.as_deref() {
            None | Some("default") | Some("") => DEFAULT_VOICE_ID,
            Some(voice) => voice,
        }
    }
}

/// Synthesized audio.
///
/// Real vendors return bytes; the mock returns a URL reference.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub audio: Option<Vec<u8>>,
    pub audio_url: Option<String>,
    pub content_type: String,
    pub voice_id: String,
}

/// Voice in the vendor catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// ElevenLabs client configuration
#[derive(Clone)]
pub struct SpeechConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Speech service trait for different backends
#[async_trait::async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesize speech for the given text
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, VendorError>;

    /// List voices available to this account
    async fn list_voices(&self) -> Result<Vec<Voice>, VendorError>;

    /// Name reported as `service_used`
    fn service_name(&self) -> &'static str;
}

/// Factory for creating SpeechService implementations
pub struct SpeechServiceFactory;

impl SpeechServiceFactory {
    pub fn create(config: &Config) -> Result<Box<dyn SpeechService>, VendorError> {
        if config.is_mock_mode() {
            tracing::info!("Creating mock speech service");
            return Ok(Box::new(mock::MockSpeechService::new()));
        }

        let api_key = config
            .credentials_for(Vendor::ElevenLabs)
            .and_then(Credential::api_key)
            .ok_or(VendorError::MissingCredential {
                vendor: Vendor::ElevenLabs,
            })?;

        tracing::info!("Creating ElevenLabs speech service");
        let service = elevenlabs::ElevenLabsService::new(SpeechConfig {
            api_key: api_key.to_string(),
            base_url: config.endpoints.elevenlabs_base_url.clone(),
            timeout: config.vendor_timeout,
        })?;
        Ok(Box::new(service))
    }
}
