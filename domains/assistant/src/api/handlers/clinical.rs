//! Chat, vitals, case summary, triage and medication handlers

use axum::extract::State;
use virtudoc_common::{Envelope, Result, ValidatedJson};

use crate::api::middleware::AssistantState;
use crate::domain::entities::{
    CaseSummary, CaseSummaryRequest, ChatRequest, ChatResponse, MedicationCheck,
    MedicationCheckRequest, TriageAssessment, TriageRequest, VitalsAnalysis, VitalsRequest,
};

/// Patient chat
pub async fn chat(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Envelope<ChatResponse>> {
    tracing::info!(patient_id = %req.patient_id, "Patient chat request");
    Ok(Envelope::ok(state.service.chat(req).await?))
}

/// Health worker vitals analysis
pub async fn analyze_vitals(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<VitalsRequest>,
) -> Result<Envelope<VitalsAnalysis>> {
    tracing::info!(patient_id = %req.patient_id, vitals = req.vitals.len(), "Vitals analysis request");
    Ok(Envelope::ok(state.service.analyze_vitals(req).await?))
}

/// Doctor case summary
pub async fn summarize_case(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<CaseSummaryRequest>,
) -> Result<Envelope<CaseSummary>> {
    Ok(Envelope::ok(state.service.summarize_case(req).await?))
}

/// Emergency triage
pub async fn emergency_triage(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<TriageRequest>,
) -> Result<Envelope<TriageAssessment>> {
    let assessment = state.service.triage(req).await?;
    tracing::info!(urgency = ?assessment.urgency_level, "Triage assessed");
    Ok(Envelope::ok(assessment))
}

/// Medication interaction check
pub async fn check_medications(
    State(state): State<AssistantState>,
    ValidatedJson(req): ValidatedJson<MedicationCheckRequest>,
) -> Result<Envelope<MedicationCheck>> {
    Ok(Envelope::ok(state.service.check_medications(req).await?))
}
