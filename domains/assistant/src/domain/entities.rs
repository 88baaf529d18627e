//! Request and response types for the assistant capabilities
//!
//! Requests derive [`Validate`] so `ValidatedJson` rejects bad input with 400
//! before any vendor is called. Responses are serialized inside the success
//! envelope.

use std::collections::BTreeMap;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use virtudoc_vision::AnalysisType;

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn vitals_present(vitals: &BTreeMap<String, f64>) -> Result<(), ValidationError> {
    if vitals.is_empty() {
        return Err(ValidationError::new("no_vitals"));
    }
    vitals_finite(vitals)
}

fn vitals_finite(vitals: &BTreeMap<String, f64>) -> Result<(), ValidationError> {
    if vitals.values().any(|v| !v.is_finite()) {
        return Err(ValidationError::new("non_finite_vital"));
    }
    Ok(())
}

fn medications_listed(medications: &[String]) -> Result<(), ValidationError> {
    if medications.is_empty() || medications.iter().any(|m| m.trim().is_empty()) {
        return Err(ValidationError::new("medications"));
    }
    Ok(())
}

/// Vendor ids end up in URL paths, so only plain segment characters pass
pub fn is_path_segment(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn path_segment(value: &str) -> Result<(), ValidationError> {
    if !is_path_segment(value) {
        return Err(ValidationError::new("path_segment"));
    }
    Ok(())
}

fn decodable_image(value: &str) -> Result<(), ValidationError> {
    match decode_image(value) {
        Some(bytes) if !bytes.is_empty() => Ok(()),
        _ => Err(ValidationError::new("image_data")),
    }
}

/// Decode base64 image data, accepting an optional `data:<mime>;base64,` prefix
pub fn decode_image(value: &str) -> Option<Vec<u8>> {
    let encoded = match value.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => value,
    };
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Speaker of a prior chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One earlier turn of the conversation, supplied by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(custom(function = "non_blank"))]
    pub message: String,
    #[validate(custom(function = "non_blank"))]
    pub patient_id: String,
    pub session_id: Option<String>,
    pub patient_history: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response_text: String,
    pub confidence: f64,
    pub requires_escalation: bool,
    pub suggested_actions: Vec<String>,
    pub session_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Vitals
// ---------------------------------------------------------------------------

/// Well-known vital sign keys read by the risk rules
pub mod vital_keys {
    pub const BP_SYSTOLIC: &str = "bp_systolic";
    pub const BP_DIASTOLIC: &str = "bp_diastolic";
    pub const HEART_RATE: &str = "heart_rate";
    pub const OXYGEN_SATURATION: &str = "oxygen_saturation";
    pub const TEMPERATURE: &str = "temperature";
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VitalsRequest {
    #[validate(custom(function = "non_blank"))]
    pub patient_id: String,
    #[validate(custom(function = "vitals_present"))]
    pub vitals: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Routine,
    Elevated,
    Urgent,
}

/// The well-known readings echoed back in a vitals analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VitalsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VitalsAnalysis {
    pub analysis: String,
    pub risk_level: RiskLevel,
    pub urgency: Urgency,
    pub flags: Vec<String>,
    pub confidence: f64,
    pub vitals_summary: VitalsSummary,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Case summary
// ---------------------------------------------------------------------------

/// Clinical notes for a case.
///
/// `symptoms`, `vitals` and `medications` accept either free text or
/// structured JSON (lists and objects), since intake forms send both.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "case_has_complaint"))]
pub struct CaseData {
    pub chief_complaint: Option<String>,
    pub symptoms: Option<serde_json::Value>,
    pub vitals: Option<serde_json::Value>,
    pub duration: Option<String>,
    pub medical_history: Option<String>,
    pub medications: Option<serde_json::Value>,
    pub notes: Option<String>,
}

impl CaseData {
    /// Symptoms as individual entries, whichever shape they arrived in
    pub fn symptom_list(&self) -> Vec<String> {
        match &self.symptoms {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(render_value)
                .filter(|s| !s.trim().is_empty())
                .collect(),
            Some(value) => render_value(value)
                .split([',', ';'])
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

fn case_has_complaint(data: &CaseData) -> Result<(), ValidationError> {
    let symptoms = data.symptoms.as_ref().map(render_value);
    if is_present(data.chief_complaint.as_deref())
        || is_present(symptoms.as_deref())
        || is_present(data.notes.as_deref())
    {
        return Ok(());
    }
    Err(ValidationError::new("case_data_empty")
        .with_message("one of chief_complaint, symptoms or notes is required".into()))
}

/// Flatten free-form JSON into prompt text; objects keep key order
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, render_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CaseSummaryRequest {
    pub patient_id: Option<String>,
    #[validate(nested)]
    pub case_data: CaseData,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary {
    pub summary: String,
    pub key_symptoms: Vec<String>,
    pub red_flags: Vec<String>,
    pub differential_diagnoses: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Text-to-speech
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TtsRequest {
    #[validate(length(min = 1, max = 5000), custom(function = "non_blank"))]
    pub text: String,
    #[validate(custom(function = "path_segment"))]
    pub voice_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeechResult {
    pub audio_url: Option<String>,
    pub audio_base64: Option<String>,
    pub content_type: String,
    pub duration_seconds: f64,
    pub voice_id: String,
    pub text_length: usize,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceList {
    pub voices: Vec<virtudoc_tts::Voice>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "video_has_content"))]
pub struct VideoSummaryRequest {
    #[validate(custom(function = "non_blank"))]
    pub patient_id: String,
    pub script: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
}

fn video_has_content(req: &VideoSummaryRequest) -> Result<(), ValidationError> {
    if is_present(req.script.as_deref()) || is_present(req.diagnosis.as_deref()) {
        return Ok(());
    }
    Err(ValidationError::new("video_content")
        .with_message("a script or a diagnosis is required".into()))
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub status: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub script: String,
    pub duration_seconds: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoStatus {
    pub video_id: String,
    pub status: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Image analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImageAnalysisRequest {
    #[validate(custom(function = "non_blank"))]
    pub patient_id: String,
    /// Base64 image bytes
    #[validate(custom(function = "decodable_image"))]
    pub image_data: String,
    #[serde(default)]
    pub analysis_type: AnalysisType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    pub findings: Vec<String>,
    pub confidence: f64,
    pub analysis_type: AnalysisType,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Triage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TriageRequest {
    #[validate(custom(function = "non_blank"))]
    pub symptoms: String,
    pub patient_id: Option<String>,
    #[validate(custom(function = "vitals_finite"))]
    pub vitals: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriageAssessment {
    pub urgency_level: UrgencyLevel,
    pub rationale: String,
    pub recommended_action: String,
    pub call_emergency: bool,
    pub immediate_actions: Vec<String>,
    pub analysis: String,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}

// ---------------------------------------------------------------------------
// Medication interactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MedicationCheckRequest {
    #[validate(custom(function = "medications_listed"))]
    pub current_medications: Vec<String>,
    #[validate(custom(function = "non_blank"))]
    pub new_medication: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicationCheck {
    pub analysis: String,
    pub timestamp: DateTime<Utc>,
    pub service_used: String,
}
