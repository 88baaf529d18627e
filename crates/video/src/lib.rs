//! VirtuDoc Video Service
//!
//! Provides personalized avatar video generation:
//! - Tavus API integration for real mode
//! - Mock video service returning placeholder media references
//! - Status lookup for previously submitted videos

pub mod mock;
pub mod tavus;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use virtudoc_common::{Config, Credential, Vendor, VendorError};

/// Request to render an avatar video from a script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    pub script: String,
    pub persona_id: Option<String>,
    pub background_url: Option<String>,
}

/// A submitted or finished video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoJob {
    pub video_id: String,
    pub status: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Tavus client configuration
#[derive(Clone)]
pub struct VideoConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for VideoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Video service trait for different backends
#[async_trait::async_trait]
pub trait VideoService: Send + Sync {
    /// Submit a video for rendering
    async fn create_video(&self, request: VideoRequest) -> Result<VideoJob, VendorError>;

    /// Look up a previously submitted video
    async fn video_status(&self, video_id: &str) -> Result<VideoJob, VendorError>;

    /// Name reported as `service_used`
    fn service_name(&self) -> &'static str;
}

/// Factory for creating VideoService implementations
pub struct VideoServiceFactory;

impl VideoServiceFactory {
    pub fn create(config: &Config) -> Result<Box<dyn VideoService>, VendorError> {
        if config.is_mock_mode() {
            tracing::info!("Creating mock video service");
            return Ok(Box::new(mock::MockVideoService::new()));
        }

        let api_key = config
            .credentials_for(Vendor::Tavus)
            .and_then(Credential::api_key)
            .ok_or(VendorError::MissingCredential {
                vendor: Vendor::Tavus,
            })?;

        tracing::info!("Creating Tavus video service");
        let service = tavus::TavusService::new(VideoConfig {
            api_key: api_key.to_string(),
            base_url: config.endpoints.tavus_base_url.clone(),
            timeout: config.vendor_timeout,
        })?;
        Ok(Box::new(service))
    }
}
