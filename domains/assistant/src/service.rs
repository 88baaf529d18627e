//! Assistant service: one operation per capability
//!
//! Builds prompts, calls the injected vendor clients through their traits,
//! and shapes results into response types. Whether a client is real or mock
//! was decided when it was constructed; vendor failures propagate as
//! [`Error::Vendor`] and are never swapped for canned output.

use std::sync::Arc;

use base64::Engine;
use chrono::Utc;
use virtudoc_common::{Config, Error, Result, VendorError};
use virtudoc_llm::{CompletionRequest, LlmMessage, LlmRole, LlmService, LlmServiceFactory};
use virtudoc_tts::{SpeechRequest, SpeechService, SpeechServiceFactory};
use virtudoc_video::{VideoRequest, VideoService, VideoServiceFactory};
use virtudoc_vision::{VisionRequest, VisionService, VisionServiceFactory};

use crate::domain::entities::{
    decode_image, is_path_segment, CaseSummary, CaseSummaryRequest, ChatRequest, ChatResponse,
    ChatRole, ImageAnalysis, ImageAnalysisRequest, MedicationCheck, MedicationCheckRequest,
    SpeechResult, TriageAssessment, TriageRequest, TtsRequest, VideoStatus, VideoSummary,
    VideoSummaryRequest, VitalsAnalysis, VitalsRequest, VoiceList,
};
use crate::domain::prompts::{build_prompt, PromptInput};
use crate::domain::rules::{self, Readings};

/// `service_used` reported by every mock client
const MOCK_SERVICE: &str = "mock";

const CASE_SUMMARY_MAX_TOKENS: u32 = 1500;
const VIDEO_DURATION_SECONDS: u32 = 60;
const DEFAULT_PATIENT_NAME: &str = "Patient";
const DEFAULT_DOCTOR_NAME: &str = "your doctor";

/// Below this confidence a chat reply is flagged for clinician review
const ESCALATION_THRESHOLD: f64 = 0.8;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed confidence per backend; mock replies are not clinically grounded
fn baseline_confidence(service_used: &str) -> f64 {
    if service_used == MOCK_SERVICE {
        0.75
    } else {
        0.9
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Text returned by the LLM for a prompt, tagged with the backend name
struct Completion {
    text: String,
    service_used: &'static str,
}

/// Orchestrates the vendor clients for every assistant capability
#[derive(Clone)]
pub struct AssistantService {
    llm: Arc<dyn LlmService>,
    speech: Arc<dyn SpeechService>,
    video: Arc<dyn VideoService>,
    vision: Arc<dyn VisionService>,
}

impl AssistantService {
    pub fn new(
        llm: Arc<dyn LlmService>,
        speech: Arc<dyn SpeechService>,
        video: Arc<dyn VideoService>,
        vision: Arc<dyn VisionService>,
    ) -> Self {
        Self {
            llm,
            speech,
            video,
            vision,
        }
    }

    /// Build every vendor client from the process configuration.
    ///
    /// Fails with [`VendorError::MissingCredential`] when real mode lacks a
    /// credential, so a misconfigured deployment never starts.
    pub async fn from_config(config: &Config) -> std::result::Result<Self, VendorError> {
        let llm = LlmServiceFactory::create(config)?;
        let speech = SpeechServiceFactory::create(config)?;
        let video = VideoServiceFactory::create(config)?;
        let vision = VisionServiceFactory::create(config).await?;

        Ok(Self::new(
            Arc::from(llm),
            Arc::from(speech),
            Arc::from(video),
            Arc::from(vision),
        ))
    }

    async fn complete(
        &self,
        input: PromptInput<'_>,
        mut history: Vec<LlmMessage>,
        max_tokens: Option<u32>,
    ) -> Result<Completion> {
        let mut request = CompletionRequest::for_prompt(input.task(), build_prompt(&input));
        // Prior turns go ahead of the rendered prompt
        history.append(&mut request.messages);
        request.messages = history;
        if let Some(max_tokens) = max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        tracing::debug!(task = input.task(), "Requesting completion");
        let response = self.llm.complete(request).await?;

        Ok(Completion {
            text: response.content,
            service_used: self.llm.service_name(),
        })
    }

    pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
        let history = req
            .conversation_history
            .iter()
            .map(|turn| LlmMessage {
                role: match turn.role {
                    ChatRole::User => LlmRole::User,
                    ChatRole::Assistant => LlmRole::Assistant,
                },
                content: turn.content.clone(),
            })
            .collect();

        let completion = self
            .complete(
                PromptInput::PatientChat {
                    message: &req.message,
                    patient_history: req.patient_history.as_deref(),
                },
                history,
                None,
            )
            .await?;

        let confidence = baseline_confidence(completion.service_used);
        let red_flags = rules::matched_keywords(&req.message, &rules::EMERGENCY_KEYWORDS);
        let requires_escalation = confidence < ESCALATION_THRESHOLD || !red_flags.is_empty();

        let suggested_actions = if requires_escalation {
            strings(&[
                "Consult healthcare provider",
                "Monitor closely",
                "Seek immediate care if symptoms worsen",
            ])
        } else {
            strings(&["Monitor symptoms", "Stay hydrated", "Rest as needed"])
        };

        Ok(ChatResponse {
            response_text: completion.text,
            confidence,
            requires_escalation,
            suggested_actions,
            session_id: req.session_id,
            timestamp: Utc::now(),
            service_used: completion.service_used.to_string(),
        })
    }

    pub async fn analyze_vitals(&self, req: VitalsRequest) -> Result<VitalsAnalysis> {
        let completion = self
            .complete(
                PromptInput::VitalsAnalysis {
                    vitals: &req.vitals,
                },
                Vec::new(),
                None,
            )
            .await?;

        let readings = Readings::from_vitals(&req.vitals);
        let risk = rules::assess_vitals(&readings);

        Ok(VitalsAnalysis {
            analysis: completion.text,
            recommendations: rules::vitals_recommendations(risk.risk_level),
            risk_level: risk.risk_level,
            urgency: risk.urgency,
            flags: risk.flags,
            confidence: baseline_confidence(completion.service_used),
            vitals_summary: readings.summary(),
            timestamp: Utc::now(),
            service_used: completion.service_used.to_string(),
        })
    }

    pub async fn summarize_case(&self, req: CaseSummaryRequest) -> Result<CaseSummary> {
        let case = &req.case_data;
        let completion = self
            .complete(
                PromptInput::CaseSummary {
                    patient_id: req.patient_id.as_deref(),
                    case_data: case,
                },
                Vec::new(),
                Some(CASE_SUMMARY_MAX_TOKENS),
            )
            .await?;

        let mut key_symptoms = case.symptom_list();
        if key_symptoms.is_empty() {
            if let Some(complaint) = non_blank(case.chief_complaint.as_deref()) {
                key_symptoms.push(complaint.trim().to_string());
            }
        }
        if key_symptoms.is_empty() {
            key_symptoms = strings(&[
                "Primary complaint identified",
                "Vital signs reviewed",
                "Patient history considered",
            ]);
        }

        let presentation = [
            case.chief_complaint.clone().unwrap_or_default(),
            key_symptoms.join(", "),
            case.notes.clone().unwrap_or_default(),
        ]
        .join(" ");
        let mut red_flags: Vec<String> =
            rules::matched_keywords(&presentation, &rules::EMERGENCY_KEYWORDS)
                .into_iter()
                .chain(rules::matched_keywords(&presentation, &rules::URGENT_KEYWORDS))
                .map(|k| format!("Reported: {}", k))
                .collect();
        if red_flags.is_empty() {
            red_flags = strings(&["Monitor for symptom progression", "Watch for complications"]);
        }

        Ok(CaseSummary {
            summary: completion.text,
            key_symptoms,
            red_flags,
            differential_diagnoses: strings(&[
                "Primary diagnosis consideration",
                "Alternative diagnosis possibility",
                "Rule out serious conditions",
            ]),
            recommended_actions: strings(&[
                "Schedule follow-up",
                "Order additional tests if needed",
                "Provide patient education",
            ]),
            timestamp: Utc::now(),
            service_used: completion.service_used.to_string(),
        })
    }

    pub async fn generate_speech(&self, req: TtsRequest) -> Result<SpeechResult> {
        let text_length = req.text.chars().count();
        let audio = self
            .speech
            .synthesize(SpeechRequest {
                text: req.text,
                voice_id: req.voice_id,
            })
            .await?;

        Ok(SpeechResult {
            audio_url: audio.audio_url,
            audio_base64: audio
                .audio
                .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes)),
            content_type: audio.content_type,
            // Roughly ten characters per spoken second
            duration_seconds: text_length as f64 / 10.0,
            voice_id: audio.voice_id,
            text_length,
            timestamp: Utc::now(),
            service_used: self.speech.service_name().to_string(),
        })
    }

    pub async fn list_voices(&self) -> Result<VoiceList> {
        let voices = self.speech.list_voices().await?;
        Ok(VoiceList {
            voices,
            service_used: self.speech.service_name().to_string(),
        })
    }

    pub async fn create_video_summary(&self, req: VideoSummaryRequest) -> Result<VideoSummary> {
        let patient_name = non_blank(req.patient_name.as_deref())
            .unwrap_or(DEFAULT_PATIENT_NAME)
            .to_string();
        let doctor_name = non_blank(req.doctor_name.as_deref())
            .unwrap_or(DEFAULT_DOCTOR_NAME)
            .to_string();

        let script = match non_blank(req.script.as_deref()) {
            Some(script) => script.to_string(),
            None => {
                self.complete(
                    PromptInput::VideoSummary {
                        diagnosis: req.diagnosis.as_deref().unwrap_or_default(),
                        treatment_plan: non_blank(req.treatment_plan.as_deref())
                            .unwrap_or("Not specified"),
                        doctor_name: &doctor_name,
                        patient_name: &patient_name,
                    },
                    Vec::new(),
                    None,
                )
                .await?
                .text
            }
        };

        let job = self
            .video
            .create_video(VideoRequest {
                script: script.clone(),
                persona_id: None,
                background_url: None,
            })
            .await?;

        Ok(VideoSummary {
            video_id: job.video_id,
            status: job.status,
            video_url: job.video_url,
            thumbnail_url: job.thumbnail_url,
            script,
            duration_seconds: VIDEO_DURATION_SECONDS,
            patient_name,
            doctor_name,
            timestamp: Utc::now(),
            service_used: self.video.service_name().to_string(),
        })
    }

    pub async fn video_status(&self, video_id: &str) -> Result<VideoStatus> {
        if !is_path_segment(video_id) {
            return Err(Error::Validation("Invalid video id".to_string()));
        }

        let job = self.video.video_status(video_id).await?;
        Ok(VideoStatus {
            video_id: job.video_id,
            status: job.status,
            video_url: job.video_url,
            thumbnail_url: job.thumbnail_url,
            service_used: self.video.service_name().to_string(),
        })
    }

    pub async fn analyze_image(&self, req: ImageAnalysisRequest) -> Result<ImageAnalysis> {
        let image = decode_image(&req.image_data)
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| Error::Validation("image_data is not valid base64".to_string()))?;

        let result = self
            .vision
            .analyze(VisionRequest {
                image,
                analysis_type: req.analysis_type,
            })
            .await?;

        Ok(ImageAnalysis {
            findings: result.findings,
            confidence: result.confidence,
            analysis_type: req.analysis_type,
            recommendations: strings(&[
                "Clinical correlation advised",
                "Follow up as needed",
                "Document changes over time",
            ]),
            timestamp: Utc::now(),
            service_used: self.vision.service_name().to_string(),
        })
    }

    pub async fn triage(&self, req: TriageRequest) -> Result<TriageAssessment> {
        let floor = rules::triage(&req.symptoms, req.vitals.as_ref());

        let completion = self
            .complete(
                PromptInput::EmergencyTriage {
                    symptoms: &req.symptoms,
                    vitals: req.vitals.as_ref(),
                },
                Vec::new(),
                None,
            )
            .await?;

        if floor.call_emergency {
            tracing::warn!(urgency = ?floor.urgency_level, "Triage flagged an emergency");
        }

        Ok(TriageAssessment {
            urgency_level: floor.urgency_level,
            rationale: floor.rationale(),
            recommended_action: floor.recommended_action().to_string(),
            call_emergency: floor.call_emergency,
            immediate_actions: floor.immediate_actions(),
            analysis: completion.text,
            timestamp: Utc::now(),
            service_used: completion.service_used.to_string(),
        })
    }

    pub async fn check_medications(&self, req: MedicationCheckRequest) -> Result<MedicationCheck> {
        let completion = self
            .complete(
                PromptInput::MedicationInteraction {
                    current_medications: &req.current_medications,
                    new_medication: &req.new_medication,
                },
                Vec::new(),
                None,
            )
            .await?;

        Ok(MedicationCheck {
            analysis: completion.text,
            timestamp: Utc::now(),
            service_used: completion.service_used.to_string(),
        })
    }
}
