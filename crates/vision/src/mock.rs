//! Mock Vision Service Implementation

use std::sync::{Arc, Mutex};

use virtudoc_common::VendorError;

use crate::{AnalysisType, VisionFindings, VisionRequest, VisionService};

const MOCK_CONFIDENCE: f64 = 0.8;

fn canned_findings(analysis_type: AnalysisType) -> Vec<String> {
    let findings: &[&str] = match analysis_type {
        AnalysisType::Skin => &[
            "Skin lesion appears benign",
            "Regular monitoring recommended",
            "Consider dermatology consultation if changes occur",
        ],
        AnalysisType::Wound => &[
            "Wound healing appears normal",
            "No signs of infection visible",
            "Continue current treatment plan",
        ],
        _ => &[
            "Image quality is adequate for analysis",
            "No obvious abnormalities detected",
            "Recommend clinical correlation",
        ],
    };
    findings.iter().map(|s| s.to_string()).collect()
}

/// Mock vision service; the recording variant keeps the analysis type of
/// each call
#[derive(Debug, Clone, Default)]
pub struct MockVisionService {
    history: Option<Arc<Mutex<Vec<AnalysisType>>>>,
}

impl MockVisionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording() -> Self {
        Self {
            history: Some(Arc::default()),
        }
    }

    pub fn recorded_analysis_types(&self) -> Vec<AnalysisType> {
        match &self.history {
            Some(history) => history.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            None => Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl VisionService for MockVisionService {
    async fn analyze(&self, request: VisionRequest) -> Result<VisionFindings, VendorError> {
        tracing::info!(analysis_type = %request.analysis_type, "Mock vision: analyzing image");

        if let Some(history) = &self.history {
            history
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(request.analysis_type);
        }

        Ok(VisionFindings {
            findings: canned_findings(request.analysis_type),
            confidence: MOCK_CONFIDENCE,
        })
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}
