//! VirtuDoc Vision Service
//!
//! Provides medical image inspection:
//! - AWS Rekognition label and text detection for real mode
//! - Mock vision service with analysis-type specific findings

pub mod mock;
pub mod rekognition;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use virtudoc_common::{Config, Credential, Vendor, VendorError};

/// Kind of inspection requested for an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    General,
    Labels,
    Text,
    Skin,
    Wound,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::General => "general",
            AnalysisType::Labels => "labels",
            AnalysisType::Text => "text",
            AnalysisType::Skin => "skin",
            AnalysisType::Wound => "wound",
        }
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded image plus the inspection to run on it
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub image: Vec<u8>,
    pub analysis_type: AnalysisType,
}

/// Human-readable findings for an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionFindings {
    pub findings: Vec<String>,
    pub confidence: f64,
}

/// Rekognition client configuration
#[derive(Clone)]
pub struct VisionConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    /// Override for LocalStack or test servers
    pub endpoint_url: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionConfig")
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Vision service trait for different backends
#[async_trait::async_trait]
pub trait VisionService: Send + Sync {
    async fn analyze(&self, request: VisionRequest) -> Result<VisionFindings, VendorError>;

    fn service_name(&self) -> &'static str;
}

/// Factory for creating VisionService implementations
pub struct VisionServiceFactory;

impl VisionServiceFactory {
    /// Async because the AWS SDK config loader is async
    pub async fn create(config: &Config) -> Result<Box<dyn VisionService>, VendorError> {
        if config.is_mock_mode() {
            tracing::info!("Creating mock vision service");
            return Ok(Box::new(mock::MockVisionService::new()));
        }

        let Some(Credential::AwsKeys {
            access_key_id,
            secret_access_key,
        }) = config.credentials_for(Vendor::Rekognition)
        else {
            return Err(VendorError::MissingCredential {
                vendor: Vendor::Rekognition,
            });
        };

        tracing::info!(region = %config.endpoints.aws_region, "Creating Rekognition vision service");
        let service = rekognition::RekognitionService::new(VisionConfig {
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
            region: config.endpoints.aws_region.clone(),
            endpoint_url: config.endpoints.aws_endpoint_url.clone(),
            timeout: config.vendor_timeout,
        })
        .await;
        Ok(Box::new(service))
    }
}
