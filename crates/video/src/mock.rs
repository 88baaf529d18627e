//! Mock Video Service Implementation
//!
//! Returns placeholder video and thumbnail URLs immediately. The recording
//! variant keeps every request for test assertions.

use std::sync::{Arc, Mutex};

use uuid::Uuid;
use virtudoc_common::VendorError;

use crate::{VideoJob, VideoRequest, VideoService};

const MOCK_VIDEO_BASE_URL: &str = "https://mock-video.virtudoc.local";

fn mock_job(video_id: String) -> VideoJob {
    VideoJob {
        video_url: Some(format!("{}/video/{}.mp4", MOCK_VIDEO_BASE_URL, video_id)),
        thumbnail_url: Some(format!("{}/thumbnail/{}.jpg", MOCK_VIDEO_BASE_URL, video_id)),
        status: "ready".to_string(),
        video_id,
    }
}

/// Mock video service
#[derive(Debug, Clone, Default)]
pub struct MockVideoService {
    history: Option<Arc<Mutex<Vec<VideoRequest>>>>,
}

impl MockVideoService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording() -> Self {
        Self {
            history: Some(Arc::default()),
        }
    }

    /// Requests received so far; always empty unless recording
    pub fn recorded_requests(&self) -> Vec<VideoRequest> {
        match &self.history {
            Some(history) => history.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            None => Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl VideoService for MockVideoService {
    async fn create_video(&self, request: VideoRequest) -> Result<VideoJob, VendorError> {
        let video_id = format!("mock-{}", Uuid::new_v4().simple());
        tracing::info!(video_id = %video_id, "Mock video: accepted script");

        if let Some(history) = &self.history {
            history.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        }

        Ok(mock_job(video_id))
    }

    async fn video_status(&self, video_id: &str) -> Result<VideoJob, VendorError> {
        Ok(mock_job(video_id.to_string()))
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}
