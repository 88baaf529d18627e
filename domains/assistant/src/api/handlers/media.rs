//! Speech, video and image handlers

use axum::extract::{Path, State};
use virtudoc_common::{Envelope, Result, ValidatedJson};

use crate::api::middleware::AssistantState;
use crate::domain::entities::{
    ImageAnalysis, ImageAnalysisRequest, SpeechResult, TtsRequest, VideoStatus, VideoSummary,
    VideoSummaryRequest, VoiceList,
};

pub async fn generate_tts(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<TtsRequest>,
) -> Result<Envelope<SpeechResult>> {
    Ok(Envelope::ok(state.service.generate_speech(req).await?))
}

pub async fn list_voices(State(state): State<AssistantState>) -> Result<Envelope<VoiceList>> {
    Ok(Envelope::ok(state.service.list_voices().await?))
}

pub async fn create_video_summary(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<VideoSummaryRequest>,
) -> Result<Envelope<VideoSummary>> {
    tracing::info!(patient_id = %req.patient_id, "Video summary request");
    Ok(Envelope::ok(state.service.create_video_summary(req).await?))
}

pub async fn video_status(
    State(state): State<AssistantState>,
    Path(video_id): Path<String>,
) -> Result<Envelope<VideoStatus>> {
    Ok(Envelope::ok(state.service.video_status(&video_id).await?))
}

pub async fn analyze_image(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<ImageAnalysisRequest>,
) -> Result<Envelope<ImageAnalysis>> {
    tracing::info!(patient_id = %req.patient_id, analysis_type = %req.analysis_type, "Image analysis request");
    Ok(Envelope::ok(state.service.analyze_image(req).await?))
}
