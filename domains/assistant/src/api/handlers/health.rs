//! Liveness and mode reporting

use std::collections::BTreeMap;

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use virtudoc_common::{Envelope, ServiceMode, Vendor};

use crate::api::middleware::AssistantState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
    pub services: BTreeMap<&'static str, &'static str>,
    pub timestamp: DateTime<Utc>,
}

/// Never calls a vendor, so it answers even when every vendor is down
pub async fn health(State(state): State<AssistantState>) -> Envelope<HealthResponse> {
    let availability = match state.mode {
        ServiceMode::Real => "available",
        ServiceMode::Mock => "mock",
    };

    Envelope::ok(HealthResponse {
        status: "healthy",
        service: "VirtuDoc AI Backend",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode.as_str(),
        services: Vendor::ALL
            .iter()
            .map(|vendor| (vendor.as_str(), availability))
            .collect(),
        timestamp: Utc::now(),
    })
}
