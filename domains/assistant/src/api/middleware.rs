//! Assistant domain state

use std::sync::Arc;

use virtudoc_common::ServiceMode;

use crate::service::AssistantService;

/// Application state for the Assistant domain
#[derive(Clone)]
pub struct AssistantState {
    pub service: Arc<AssistantService>,
    /// Reported by the health route only; vendor clients already reflect it
    pub mode: ServiceMode,
}

impl AssistantState {
    pub fn new(service: AssistantService, mode: ServiceMode) -> Self {
        Self {
            service: Arc::new(service),
            mode,
        }
    }
}
