//! Deterministic clinical rules
//!
//! Vitals risk and the triage floor are computed locally so the urgency of a
//! case never depends on free-text model output.

use std::collections::BTreeMap;

use crate::domain::entities::{vital_keys, RiskLevel, Urgency, UrgencyLevel, VitalsSummary};

/// Phrases that force an emergency triage level
pub const EMERGENCY_KEYWORDS: [&str; 5] = [
    "chest pain",
    "difficulty breathing",
    "unconscious",
    "severe bleeding",
    "stroke",
];

/// Phrases that raise triage to high
pub const URGENT_KEYWORDS: [&str; 4] = [
    "severe pain",
    "high fever",
    "vomiting blood",
    "severe headache",
];

/// Keywords from `keywords` that occur in `text`, case-insensitively
pub fn matched_keywords(text: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .copied()
        .filter(|k| lower.contains(k))
        .collect()
}

/// Well-known readings pulled from a free-form vitals map
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub heart_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub temperature: Option<f64>,
}

impl Readings {
    pub fn from_vitals(vitals: &BTreeMap<String, f64>) -> Self {
        let get = |key: &str| vitals.get(key).copied();
        Self {
            systolic: get(vital_keys::BP_SYSTOLIC),
            diastolic: get(vital_keys::BP_DIASTOLIC),
            heart_rate: get(vital_keys::HEART_RATE),
            oxygen_saturation: get(vital_keys::OXYGEN_SATURATION),
            temperature: get(vital_keys::TEMPERATURE),
        }
    }

    pub fn summary(&self) -> VitalsSummary {
        let blood_pressure = match (self.systolic, self.diastolic) {
            (Some(s), Some(d)) => Some(format!("{}/{}", s, d)),
            (Some(s), None) => Some(format!("{}/-", s)),
            (None, Some(d)) => Some(format!("-/{}", d)),
            (None, None) => None,
        };
        VitalsSummary {
            blood_pressure,
            heart_rate: self.heart_rate,
            oxygen_saturation: self.oxygen_saturation,
            temperature: self.temperature,
        }
    }
}

fn above(value: Option<f64>, limit: f64) -> Option<f64> {
    value.filter(|v| *v > limit)
}

fn below(value: Option<f64>, limit: f64) -> Option<f64> {
    value.filter(|v| *v < limit)
}

/// Outcome of the vitals risk rules
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsRisk {
    pub risk_level: RiskLevel,
    pub urgency: Urgency,
    pub flags: Vec<String>,
}

/// Blood pressure above 140/90 is elevated; low SpO2, tachycardia or fever
/// is urgent. Missing readings never raise risk.
pub fn assess_vitals(readings: &Readings) -> VitalsRisk {
    let mut risk_level = RiskLevel::Low;
    let mut urgency = Urgency::Routine;
    let mut flags = Vec::new();

    if let Some(s) = above(readings.systolic, 140.0) {
        flags.push(format!("Elevated systolic blood pressure ({} mmHg)", s));
    }
    if let Some(d) = above(readings.diastolic, 90.0) {
        flags.push(format!("Elevated diastolic blood pressure ({} mmHg)", d));
    }
    if !flags.is_empty() {
        risk_level = RiskLevel::Medium;
        urgency = Urgency::Elevated;
    }

    let urgent_count = flags.len();
    if let Some(o) = below(readings.oxygen_saturation, 95.0) {
        flags.push(format!("Low oxygen saturation ({}%)", o));
    }
    if let Some(hr) = above(readings.heart_rate, 100.0) {
        flags.push(format!("Tachycardia ({} bpm)", hr));
    }
    if let Some(t) = above(readings.temperature, 101.0) {
        flags.push(format!("Fever ({} °F)", t));
    }
    if flags.len() > urgent_count {
        risk_level = RiskLevel::High;
        urgency = Urgency::Urgent;
    }

    VitalsRisk {
        risk_level,
        urgency,
        flags,
    }
}

pub fn vitals_recommendations(risk_level: RiskLevel) -> Vec<String> {
    let items: &[&str] = match risk_level {
        RiskLevel::Low => &["Continue monitoring", "Maintain current treatment plan"],
        RiskLevel::Medium | RiskLevel::High => &[
            "Escalate to doctor",
            "Increase monitoring frequency",
            "Consider immediate intervention",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Outcome of the triage rules
#[derive(Debug, Clone, PartialEq)]
pub struct TriageFloor {
    pub urgency_level: UrgencyLevel,
    pub call_emergency: bool,
    pub reasons: Vec<String>,
}

impl TriageFloor {
    pub fn rationale(&self) -> String {
        if self.reasons.is_empty() {
            return "No emergency or urgent indicators in the reported symptoms or vitals"
                .to_string();
        }
        self.reasons.join("; ")
    }

    pub fn recommended_action(&self) -> &'static str {
        match self.urgency_level {
            UrgencyLevel::Emergency => "Call emergency services (911/112) immediately",
            UrgencyLevel::High => "Seek medical care within 1-2 hours",
            UrgencyLevel::Medium => "Arrange a medical evaluation within 24 hours",
            UrgencyLevel::Low => "Routine care is appropriate; monitor symptoms",
        }
    }

    pub fn immediate_actions(&self) -> Vec<String> {
        let first = if self.call_emergency {
            "Call emergency services immediately"
        } else {
            "Seek medical attention"
        };
        vec![
            first.to_string(),
            "Monitor vital signs".to_string(),
            "Stay with patient".to_string(),
        ]
    }
}

/// Emergency keywords or critical vitals → emergency; urgent keywords → high;
/// any vitals risk flag → medium; otherwise low.
pub fn triage(symptoms: &str, vitals: Option<&BTreeMap<String, f64>>) -> TriageFloor {
    let readings = vitals.map(Readings::from_vitals).unwrap_or_default();
    let mut reasons = Vec::new();

    for keyword in matched_keywords(symptoms, &EMERGENCY_KEYWORDS) {
        reasons.push(format!("Emergency symptom reported: {}", keyword));
    }
    if let Some(o) = below(readings.oxygen_saturation, 90.0) {
        reasons.push(format!("Critical oxygen saturation ({}%)", o));
    }
    if let Some(hr) = above(readings.heart_rate, 120.0) {
        reasons.push(format!("Critical heart rate ({} bpm)", hr));
    }
    if let Some(s) = above(readings.systolic, 180.0) {
        reasons.push(format!("Critical systolic blood pressure ({} mmHg)", s));
    }
    if !reasons.is_empty() {
        return TriageFloor {
            urgency_level: UrgencyLevel::Emergency,
            call_emergency: true,
            reasons,
        };
    }

    for keyword in matched_keywords(symptoms, &URGENT_KEYWORDS) {
        reasons.push(format!("Urgent symptom reported: {}", keyword));
    }
    if !reasons.is_empty() {
        return TriageFloor {
            urgency_level: UrgencyLevel::High,
            call_emergency: false,
            reasons,
        };
    }

    let risk = assess_vitals(&readings);
    let urgency_level = if risk.flags.is_empty() {
        UrgencyLevel::Low
    } else {
        UrgencyLevel::Medium
    };
    TriageFloor {
        urgency_level,
        call_emergency: false,
        reasons: risk.flags,
    }
}
