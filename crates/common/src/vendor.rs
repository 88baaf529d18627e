//! Vendor identities and the failure taxonomy shared by all vendor clients
//!
//! Every vendor crate (LLM, TTS, video, vision) reports failures as a
//! [`VendorError`] so the HTTP layer can map them to one status code table.

use serde::{Deserialize, Serialize};

/// Longest vendor error body kept for logging
const MAX_DETAIL_CHARS: usize = 500;

/// External AI vendors reachable from the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// Hosted LLM (Anthropic Messages API)
    Claude,
    /// Text-to-speech
    ElevenLabs,
    /// Video avatar generation
    Tavus,
    /// Image recognition (AWS Rekognition)
    Rekognition,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [
        Vendor::Claude,
        Vendor::ElevenLabs,
        Vendor::Tavus,
        Vendor::Rekognition,
    ];

    /// Name reported in `service_used` and health output
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Claude => "claude",
            Vendor::ElevenLabs => "elevenlabs",
            Vendor::Tavus => "tavus",
            Vendor::Rekognition => "rekognition",
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure talking to an external vendor
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("{vendor} credential is not configured")]
    MissingCredential { vendor: Vendor },

    #[error("{vendor} request failed: {detail}")]
    Unavailable { vendor: Vendor, detail: String },

    #[error("{vendor} returned status {status}: {detail}")]
    Status {
        vendor: Vendor,
        status: u16,
        detail: String,
    },

    #[error("{vendor} did not respond in time")]
    Timeout { vendor: Vendor },

    #[error("{vendor} response could not be parsed: {detail}")]
    Malformed { vendor: Vendor, detail: String },
}

impl VendorError {
    pub fn unavailable(vendor: Vendor, detail: impl Into<String>) -> Self {
        VendorError::Unavailable {
            vendor,
            detail: detail.into(),
        }
    }

    pub fn malformed(vendor: Vendor, detail: impl Into<String>) -> Self {
        VendorError::Malformed {
            vendor,
            detail: detail.into(),
        }
    }

    /// The vendor that failed
    pub fn vendor(&self) -> Vendor {
        match self {
            VendorError::MissingCredential { vendor }
            | VendorError::Unavailable { vendor, .. }
            | VendorError::Status { vendor, .. }
            | VendorError::Timeout { vendor }
            | VendorError::Malformed { vendor, .. } => *vendor,
        }
    }

    /// Classify a reqwest failure.
    ///
    /// The URL is stripped first: some vendors carry keys in the path.
    pub fn from_reqwest(vendor: Vendor, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VendorError::Timeout { vendor }
        } else if err.is_decode() {
            VendorError::malformed(vendor, err.without_url().to_string())
        } else {
            VendorError::unavailable(vendor, err.without_url().to_string())
        }
    }

    /// Build an error from a non-success vendor response, keeping a
    /// truncated copy of the body for logs.
    pub async fn from_response(vendor: Vendor, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let detail = match response.text().await {
            Ok(body) => body.chars().take(MAX_DETAIL_CHARS).collect(),
            Err(e) if e.is_timeout() => return VendorError::Timeout { vendor },
            Err(_) => "Failed to read error body".to_string(),
        };

        VendorError::Status {
            vendor,
            status,
            detail,
        }
    }

    /// Message safe to return to API callers: no vendor bodies, URLs or keys
    pub fn public_message(&self) -> String {
        match self {
            VendorError::MissingCredential { vendor } => {
                format!("The {} service is not configured", vendor)
            }
            VendorError::Unavailable { vendor, .. } | VendorError::Status { vendor, .. } => {
                format!("The {} service is currently unavailable", vendor)
            }
            VendorError::Timeout { vendor } => {
                format!("The {} service did not respond in time", vendor)
            }
            VendorError::Malformed { vendor, .. } => {
                format!("The {} service returned an unexpected response", vendor)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_vendor_names() {
        assert_eq!(Vendor::Claude.as_str(), "claude");
        assert_eq!(Vendor::ElevenLabs.to_string(), "elevenlabs");
        assert_eq!(
            serde_json::to_value(Vendor::Rekognition).unwrap(),
            serde_json::json!("rekognition")
        );
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = VendorError::Status {
            vendor: Vendor::Tavus,
            status: 401,
            detail: "invalid x-api-key sk-secret".to_string(),
        };
        let message = err.public_message();
        assert!(!message.contains("sk-secret"));
        assert_eq!(message, "The tavus service is currently unavailable");
        // Display keeps the detail for logs
        assert!(err.to_string().contains("sk-secret"));
    }

    #[test]
    fn test_vendor_accessor() {
        let err = VendorError::malformed(Vendor::Claude, "bad json");
        assert_eq!(err.vendor(), Vendor::Claude);
        assert_eq!(
            VendorError::Timeout {
                vendor: Vendor::ElevenLabs
            }
            .vendor(),
            Vendor::ElevenLabs
        );
    }

    #[tokio::test]
    async fn test_from_reqwest_classifies_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let err = client
            .get(format!("{}/slow", server.uri()))
            .send()
            .await
            .unwrap_err();

        let classified = VendorError::from_reqwest(Vendor::Claude, err);
        assert!(matches!(classified, VendorError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_from_reqwest_classifies_connection_failure() {
        // Nothing listens on port 9 (discard) in test environments
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();

        let classified = VendorError::from_reqwest(Vendor::Tavus, err);
        assert!(matches!(classified, VendorError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_from_response_keeps_status_and_truncates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("x".repeat(2000)))
            .mount(&server)
            .await;

        let response = reqwest::get(server.uri()).await.unwrap();
        match VendorError::from_response(Vendor::ElevenLabs, response).await {
            VendorError::Status { status, detail, .. } => {
                assert_eq!(status, 503);
                assert_eq!(detail.len(), MAX_DETAIL_CHARS);
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }
}
