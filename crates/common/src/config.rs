//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at startup.
//! The resulting [`Config`] is immutable and handed to the vendor factories
//! and router state explicitly; nothing reads the environment afterwards.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use crate::vendor::Vendor;

const DEFAULT_VENDOR_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 5000;

/// Whether vendor calls are real or served from canned responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    Mock,
    Real,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMode::Mock => "mock",
            ServiceMode::Real => "real",
        }
    }
}

/// Credential bundle for one vendor
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Single API key sent as a request header
    ApiKey(String),
    /// AWS access key pair
    AwsKeys {
        access_key_id: String,
        secret_access_key: String,
    },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Credential::AwsKeys { .. } => f.write_str("AwsKeys([REDACTED])"),
        }
    }
}

impl Credential {
    /// The API key, if this is a key credential
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Credential::ApiKey(key) => Some(key),
            Credential::AwsKeys { .. } => None,
        }
    }
}

/// Vendor endpoints and model selection
#[derive(Debug, Clone)]
pub struct VendorEndpoints {
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub elevenlabs_base_url: String,
    pub tavus_base_url: String,
    pub aws_region: String,
    /// Custom AWS endpoint (LocalStack)
    pub aws_endpoint_url: Option<String>,
}

impl Default for VendorEndpoints {
    fn default() -> Self {
        Self {
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            anthropic_model: "claude-3-5-sonnet-20241022".to_string(),
            elevenlabs_base_url: "https://api.elevenlabs.io".to_string(),
            tavus_base_url: "https://tavusapi.com".to_string(),
            aws_region: "us-east-1".to_string(),
            aws_endpoint_url: None,
        }
    }
}

/// Process-wide, read-only configuration
#[derive(Clone)]
pub struct Config {
    pub mode: ServiceMode,
    pub credentials: BTreeMap<Vendor, Credential>,
    pub endpoints: VendorEndpoints,
    /// Upper bound on every outbound vendor call
    pub vendor_timeout: Duration,
    pub port: u16,
    pub cors_allowed_origins: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("mode", &self.mode)
            .field("credentials", &self.credentials.keys().collect::<Vec<_>>())
            .field("endpoints", &self.endpoints)
            .field("vendor_timeout", &self.vendor_timeout)
            .field("port", &self.port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Vendor credentials and endpoints are only consulted in real mode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match var("USE_REAL_AI_SERVICES") {
            None => ServiceMode::Mock,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => ServiceMode::Real,
                "false" | "0" | "no" => ServiceMode::Mock,
                other => {
                    return Err(anyhow!(
                        "USE_REAL_AI_SERVICES must be true or false, got '{}'",
                        other
                    ))
                }
            },
        };

        let vendor_timeout = match var("VENDOR_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_VENDOR_TIMEOUT_SECS),
            Some(value) => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("VENDOR_TIMEOUT_SECS must be a positive integer"))?;
                if secs == 0 {
                    return Err(anyhow!("VENDOR_TIMEOUT_SECS must be a positive integer"));
                }
                Duration::from_secs(secs)
            }
        };

        let port = var("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let mut credentials = BTreeMap::new();
        let mut endpoints = VendorEndpoints::default();

        if mode == ServiceMode::Real {
            if let Some(key) = var("ANTHROPIC_API_KEY") {
                credentials.insert(Vendor::Claude, Credential::ApiKey(key));
            }
            if let Some(key) = var("ELEVENLABS_API_KEY") {
                credentials.insert(Vendor::ElevenLabs, Credential::ApiKey(key));
            }
            if let Some(key) = var("TAVUS_API_KEY") {
                credentials.insert(Vendor::Tavus, Credential::ApiKey(key));
            }
            if let (Some(access_key_id), Some(secret_access_key)) =
                (var("AWS_ACCESS_KEY_ID"), var("AWS_SECRET_ACCESS_KEY"))
            {
                credentials.insert(
                    Vendor::Rekognition,
                    Credential::AwsKeys {
                        access_key_id,
                        secret_access_key,
                    },
                );
            }

            if let Some(url) = var("ANTHROPIC_BASE_URL") {
                endpoints.anthropic_base_url = url;
            }
            if let Some(model) = var("ANTHROPIC_MODEL") {
                endpoints.anthropic_model = model;
            }
            if let Some(url) = var("ELEVENLABS_BASE_URL") {
                endpoints.elevenlabs_base_url = url;
            }
            if let Some(url) = var("TAVUS_BASE_URL") {
                endpoints.tavus_base_url = url;
            }
            if let Some(region) = var("AWS_REGION") {
                endpoints.aws_region = region;
            }
            endpoints.aws_endpoint_url = var("AWS_ENDPOINT_URL");
        }

        Ok(Self {
            mode,
            credentials,
            endpoints,
            vendor_timeout,
            port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }

    /// Mock-mode configuration with defaults, for tests and local runs
    pub fn mock() -> Self {
        Self {
            mode: ServiceMode::Mock,
            credentials: BTreeMap::new(),
            endpoints: VendorEndpoints::default(),
            vendor_timeout: Duration::from_secs(DEFAULT_VENDOR_TIMEOUT_SECS),
            port: DEFAULT_PORT,
            cors_allowed_origins: None,
        }
    }

    pub fn is_mock_mode(&self) -> bool {
        self.mode == ServiceMode::Mock
    }

    /// Credentials for a vendor; always `None` in mock mode
    pub fn credentials_for(&self, vendor: Vendor) -> Option<&Credential> {
        if self.is_mock_mode() {
            return None;
        }
        self.credentials.get(&vendor)
    }
}
