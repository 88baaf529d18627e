//! VirtuDoc LLM Service
//!
//! Provides text completion for every prompt-driven capability:
//! - Anthropic Messages API integration for real mode
//! - Canned mock service for mock mode and tests
//! - Factory that picks one from the process [`Config`]

pub mod anthropic;
pub mod mock;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use virtudoc_common::{Config, Credential, Vendor, VendorError};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

/// One conversation turn sent to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }
}

/// Completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model name; empty means the service default
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
    /// Capability tag (e.g. `patient_chat`), used by the mock to pick a reply
    pub task: Option<String>,
}

impl CompletionRequest {
    /// Single-turn request for a built prompt
    pub fn for_prompt(task: &str, prompt: String) -> Self {
        Self {
            model: String::new(),
            system_prompt: None,
            messages: vec![LlmMessage::user(prompt)],
            max_tokens: None,
            task: Some(task.to_string()),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Completion response
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub stop_reason: String,
}

/// LLM service configuration
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub default_model: String,
    pub max_tokens: u32,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// LLM service trait for different backends
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Run a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VendorError>;

    /// Model used when the request leaves it empty
    fn default_model(&self) -> &str;

    /// Name reported as `service_used`
    fn service_name(&self) -> &'static str;
}

/// Factory for creating LlmService implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Default completion budget, matching the chat prompt size
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;

    pub fn create(config: &Config) -> Result<Box<dyn LlmService>, VendorError> {
        if config.is_mock_mode() {
            tracing::info!("Creating mock LLM service");
            return Ok(Box::new(mock::MockLlmService::new()));
        }

        let api_key = config
            .credentials_for(Vendor::Claude)
            .and_then(Credential::api_key)
            .ok_or(VendorError::MissingCredential {
                vendor: Vendor::Claude,
            })?;

        tracing::info!(model = %config.endpoints.anthropic_model, "Creating Anthropic LLM service");
        let service = anthropic::AnthropicService::new(LlmConfig {
            api_key: api_key.to_string(),
            default_model: config.endpoints.anthropic_model.clone(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            base_url: Some(config.endpoints.anthropic_base_url.clone()),
            timeout: config.vendor_timeout,
        })?;
        Ok(Box::new(service))
    }
}
