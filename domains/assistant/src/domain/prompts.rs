//! Clinical prompt templates
//!
//! Pure functions from request payloads to prompt text. Map inputs are
//! `BTreeMap`s so the same payload always renders the same prompt.

use std::collections::BTreeMap;

use crate::domain::entities::{render_value, CaseData};

/// Task tag attached to each completion request
pub mod tasks {
    pub const PATIENT_CHAT: &str = "patient_chat";
    pub const VITALS_ANALYSIS: &str = "vitals_analysis";
    pub const CASE_SUMMARY: &str = "case_summary";
    pub const VIDEO_SCRIPT: &str = "video_script";
    pub const EMERGENCY_TRIAGE: &str = "emergency_triage";
    pub const MEDICATION_INTERACTION: &str = "medication_interaction";
}

/// Payload for one of the prompt templates
#[derive(Debug, Clone, Copy)]
pub enum PromptInput<'a> {
    PatientChat {
        message: &'a str,
        patient_history: Option<&'a str>,
    },
    VitalsAnalysis {
        vitals: &'a BTreeMap<String, f64>,
    },
    CaseSummary {
        patient_id: Option<&'a str>,
        case_data: &'a CaseData,
    },
    VideoSummary {
        diagnosis: &'a str,
        treatment_plan: &'a str,
        doctor_name: &'a str,
        patient_name: &'a str,
    },
    EmergencyTriage {
        symptoms: &'a str,
        vitals: Option<&'a BTreeMap<String, f64>>,
    },
    MedicationInteraction {
        current_medications: &'a [String],
        new_medication: &'a str,
    },
}

impl PromptInput<'_> {
    pub fn task(&self) -> &'static str {
        match self {
            PromptInput::PatientChat { .. } => tasks::PATIENT_CHAT,
            PromptInput::VitalsAnalysis { .. } => tasks::VITALS_ANALYSIS,
            PromptInput::CaseSummary { .. } => tasks::CASE_SUMMARY,
            PromptInput::VideoSummary { .. } => tasks::VIDEO_SCRIPT,
            PromptInput::EmergencyTriage { .. } => tasks::EMERGENCY_TRIAGE,
            PromptInput::MedicationInteraction { .. } => tasks::MEDICATION_INTERACTION,
        }
    }
}

/// Render the template matching `input`
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    match *input {
        PromptInput::PatientChat {
            message,
            patient_history,
        } => patient_chat(message, patient_history),
        PromptInput::VitalsAnalysis { vitals } => vitals_analysis(vitals),
        PromptInput::CaseSummary {
            patient_id,
            case_data,
        } => case_summary(patient_id, case_data),
        PromptInput::VideoSummary {
            diagnosis,
            treatment_plan,
            doctor_name,
            patient_name,
        } => video_summary(diagnosis, treatment_plan, doctor_name, patient_name),
        PromptInput::EmergencyTriage { symptoms, vitals } => emergency_triage(symptoms, vitals),
        PromptInput::MedicationInteraction {
            current_medications,
            new_medication,
        } => medication_interaction(current_medications, new_medication),
    }
}

/// `bp_systolic` → `Bp Systolic`
fn label(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn vitals_lines(vitals: &BTreeMap<String, f64>) -> String {
    vitals
        .iter()
        .map(|(key, value)| format!("- {}: {}\n", label(key), value))
        .collect()
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

pub fn patient_chat(message: &str, patient_history: Option<&str>) -> String {
    let mut prompt = format!(
        r#"You are a compassionate virtual health assistant for VirtuDoc, a telemedicine platform.
Your role is to provide helpful, medically sound, and empathetic responses to patients while being clear about your limitations.

IMPORTANT GUIDELINES:
- Always be compassionate and understanding
- Provide general health information, not specific medical diagnoses
- Encourage patients to seek professional medical care when appropriate
- Keep responses concise and easy to understand
- If symptoms seem serious, recommend immediate medical attention
- Never provide specific medication recommendations
- Always remind patients that you cannot replace professional medical advice

Patient message: "{}"
"#,
        message
    );

    if let Some(history) = patient_history.filter(|h| !h.trim().is_empty()) {
        prompt.push_str(&format!("\nPatient history context: {}", history));
    }

    prompt.push_str("\nProvide a helpful, compassionate response:");
    prompt
}

pub fn vitals_analysis(vitals: &BTreeMap<String, f64>) -> String {
    format!(
        r#"You are a medical AI assistant helping health workers analyze patient vital signs.
Analyze the following vital signs and provide a professional assessment.

Vital Signs:
{}
Please provide:
1. Overall assessment of the vital signs
2. Risk level (low, medium, high)
3. Urgency level (routine, elevated, urgent)
4. Specific concerns or red flags
5. Recommended next actions for the health worker

Keep your response professional and actionable for healthcare workers."#,
        vitals_lines(vitals)
    )
}

pub fn case_summary(patient_id: Option<&str>, case: &CaseData) -> String {
    let render = |value: &Option<serde_json::Value>, default: &str| -> String {
        value
            .as_ref()
            .map(render_value)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let mut prompt = format!(
        r#"You are a medical AI assistant helping doctors review patient cases.
Create a comprehensive case summary for the attending physician.

Case Information:
- Patient ID: {}
- Chief Complaint: {}
- Symptoms: {}
- Vital Signs: {}
- Duration: {}
- Previous Medical History: {}
- Current Medications: {}
"#,
        or_default(patient_id, "Unknown"),
        or_default(case.chief_complaint.as_deref(), "Not specified"),
        render(&case.symptoms, "Not specified"),
        render(&case.vitals, "Not recorded"),
        or_default(case.duration.as_deref(), "Not specified"),
        or_default(case.medical_history.as_deref(), "Not available"),
        render(&case.medications, "Not specified"),
    );

    if let Some(notes) = case.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        prompt.push_str(&format!("- Clinician Notes: {}\n", notes));
    }

    prompt.push_str(
        r#"
Please provide:
1. Case Summary: Brief overview of the patient's presentation
2. Key Symptoms: Most significant symptoms and findings
3. Red Flags: Any concerning symptoms that require immediate attention
4. Differential Diagnoses: Possible diagnoses to consider
5. Recommended Actions: Suggested next steps for evaluation and treatment
6. Follow-up Recommendations: When and how to follow up with the patient

Format your response in a clear, professional manner suitable for physician review."#,
    );
    prompt
}

pub fn video_summary(
    diagnosis: &str,
    treatment_plan: &str,
    doctor_name: &str,
    patient_name: &str,
) -> String {
    format!(
        r#"Create a warm, patient-friendly script for a personalized video summary.
This will be delivered by an AI avatar to help the patient understand their consultation.

Consultation Details:
- Doctor: {}
- Patient: {}
- Diagnosis/Assessment: {}
- Treatment Plan: {}

Create a script that:
1. Warmly greets the patient by name
2. Summarizes the key findings in simple, non-medical language
3. Explains the treatment plan clearly
4. Provides reassurance and encouragement
5. Reminds them of follow-up instructions
6. Ends with supportive closing remarks

Keep the tone:
- Warm and reassuring
- Easy to understand (avoid medical jargon)
- Encouraging and positive
- Professional but friendly
- Approximately 60-90 seconds when spoken

Format as a natural speech script suitable for text-to-speech conversion."#,
        doctor_name, patient_name, diagnosis, treatment_plan
    )
}

pub fn emergency_triage(symptoms: &str, vitals: Option<&BTreeMap<String, f64>>) -> String {
    let vitals_section = match vitals.filter(|v| !v.is_empty()) {
        Some(v) => format!("Vital Signs:\n{}", vitals_lines(v)),
        None => "Vital Signs: Not available".to_string(),
    };

    format!(
        r#"You are an emergency triage AI assistant. Assess the urgency of this patient's condition.

Patient Symptoms: {}

{}

Provide:
1. Triage Level:
   - IMMEDIATE (life-threatening, needs emergency care now)
   - URGENT (serious condition, needs care within 1-2 hours)
   - LESS URGENT (needs care within 24 hours)
   - NON-URGENT (routine care appropriate)

2. Reasoning: Brief explanation for the triage level
3. Red Flags: Any concerning symptoms that influenced the decision
4. Immediate Actions: What should be done right now
5. Escalation: Whether to call emergency services (911/112)

Be conservative in your assessment when in doubt, escalate to a higher triage level."#,
        symptoms, vitals_section
    )
}

pub fn medication_interaction(current_medications: &[String], new_medication: &str) -> String {
    let medications = current_medications
        .iter()
        .map(|m| format!("- {}", m))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a pharmaceutical AI assistant. Check for potential interactions between medications.

Current Medications:
{}

New Medication Being Considered: {}

Please analyze:
1. Potential Drug Interactions: Any known interactions between the new medication and current medications
2. Severity Level: Rate interactions as Minor, Moderate, or Major
3. Clinical Significance: What these interactions might mean for the patient
4. Recommendations: Suggestions for the prescribing physician
5. Monitoring Requirements: What should be monitored if this medication is prescribed

Important: This is for healthcare provider reference only. Always recommend consulting with a pharmacist or physician for final medication decisions."#,
        medications, new_medication
    )
}
