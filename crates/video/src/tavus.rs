//! Tavus Video Implementation
//!
//! `POST {base_url}/v2/videos` submits a script; `GET {base_url}/v2/videos/{id}`
//! reports progress.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use virtudoc_common::{Vendor, VendorError};

use crate::{VideoConfig, VideoJob, VideoRequest, VideoService};

const DEFAULT_PERSONA: &str = "default";

#[derive(Debug, Serialize)]
struct CreateVideoBody<'a> {
    script: &'a str,
    persona_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_url: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TavusVideo {
    video_id: Option<String>,
    status: Option<String>,
    download_url: Option<String>,
    thumbnail_url: Option<String>,
}

impl TavusVideo {
    fn into_job(self) -> Result<VideoJob, VendorError> {
        let video_id = self
            .video_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| VendorError::malformed(Vendor::Tavus, "response missing video_id"))?;

        Ok(VideoJob {
            video_id,
            status: self.status.unwrap_or_else(|| "queued".to_string()),
            video_url: self.download_url,
            thumbnail_url: self.thumbnail_url,
        })
    }
}

/// Tavus video service implementation
pub struct TavusService {
    client: Client,
    config: VideoConfig,
}

impl TavusService {
    pub fn new(config: VideoConfig) -> Result<Self, VendorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VendorError::unavailable(Vendor::Tavus, e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn parse(response: reqwest::Response) -> Result<VideoJob, VendorError> {
        if !response.status().is_success() {
            return Err(VendorError::from_response(Vendor::Tavus, response).await);
        }

        let video: TavusVideo = response
            .json()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::Tavus, e))?;

        video.into_job()
    }
}

#[async_trait::async_trait]
impl VideoService for TavusService {
    async fn create_video(&self, request: VideoRequest) -> Result<VideoJob, VendorError> {
        let body = CreateVideoBody {
            script: &request.script,
            persona_id: request.persona_id.as_deref().unwrap_or(DEFAULT_PERSONA),
            background_url: request.background_url.as_deref(),
        };

        tracing::debug!(script_length = request.script.len(), "Sending Tavus create video request");

        let response = self
            .client
            .post(self.url("/v2/videos"))
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::Tavus, e))?;

        Self::parse(response).await
    }

    async fn video_status(&self, video_id: &str) -> Result<VideoJob, VendorError> {
        let response = self
            .client
            .get(self.url(&format!("/v2/videos/{}", video_id)))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| VendorError::from_reqwest(Vendor::Tavus, e))?;

        Self::parse(response).await
    }

    fn service_name(&self) -> &'static str {
        Vendor::Tavus.as_str()
    }
}
