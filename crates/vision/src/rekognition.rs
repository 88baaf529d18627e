//! AWS Rekognition Vision Implementation
//!
//! `text` analysis runs DetectText; every other analysis type runs
//! DetectLabels. Results are condensed into the top five findings.

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_rekognition::config::http::HttpResponse;
use aws_sdk_rekognition::config::SharedCredentialsProvider;
use aws_sdk_rekognition::error::{DisplayErrorContext, SdkError};
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{Image, TextTypes};
use aws_sdk_rekognition::Client as RekognitionClient;
use virtudoc_common::{Vendor, VendorError};

use crate::{AnalysisType, VisionConfig, VisionFindings, VisionRequest, VisionService};

const MAX_LABELS: i32 = 10;
const MIN_CONFIDENCE: f32 = 70.0;
const MAX_FINDINGS: usize = 5;
const REAL_CONFIDENCE: f64 = 0.85;

/// AWS Rekognition vision service implementation
pub struct RekognitionService {
    client: RekognitionClient,
}

impl RekognitionService {
    pub async fn new(config: VisionConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None,
            None,
            "virtudoc-static",
        );

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(config.timeout)
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .timeout_config(timeouts)
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint_url) = config.endpoint_url.as_ref() {
            tracing::info!("Using custom AWS endpoint: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }

        let aws_config = loader.load().await;

        Self {
            client: RekognitionClient::new(&aws_config),
        }
    }

    async fn detect_labels(&self, image: Image) -> Result<Vec<String>, VendorError> {
        let output = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(MAX_LABELS)
            .min_confidence(MIN_CONFIDENCE)
            .send()
            .await
            .map_err(classify)?;

        Ok(output
            .labels()
            .iter()
            .filter_map(|label| {
                let name = label.name()?;
                Some(format!(
                    "Detected: {} (confidence: {:.1}%)",
                    name,
                    label.confidence().unwrap_or_default()
                ))
            })
            .take(MAX_FINDINGS)
            .collect())
    }

    async fn detect_text(&self, image: Image) -> Result<Vec<String>, VendorError> {
        let output = self
            .client
            .detect_text()
            .image(image)
            .send()
            .await
            .map_err(classify)?;

        // Words repeat the content of their parent line
        Ok(output
            .text_detections()
            .iter()
            .filter(|detection| detection.r#type() == Some(&TextTypes::Line))
            .filter_map(|detection| {
                let text = detection.detected_text()?;
                Some(format!(
                    "Detected text: \"{}\" (confidence: {:.1}%)",
                    text,
                    detection.confidence().unwrap_or_default()
                ))
            })
            .take(MAX_FINDINGS)
            .collect())
    }
}

/// Map an SDK failure onto the shared vendor taxonomy
fn classify<E>(err: SdkError<E, HttpResponse>) -> VendorError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let vendor = Vendor::Rekognition;
    let detail = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::TimeoutError(_) => VendorError::Timeout { vendor },
        SdkError::ServiceError(context) => VendorError::Status {
            vendor,
            status: context.raw().status().as_u16(),
            detail,
        },
        SdkError::ResponseError(_) => VendorError::malformed(vendor, detail),
        _ => VendorError::unavailable(vendor, detail),
    }
}

#[async_trait::async_trait]
impl VisionService for RekognitionService {
    async fn analyze(&self, request: VisionRequest) -> Result<VisionFindings, VendorError> {
        tracing::debug!(
            analysis_type = %request.analysis_type,
            image_bytes = request.image.len(),
            "Sending Rekognition request"
        );

        let image = Image::builder().bytes(Blob::new(request.image)).build();

        let findings = match request.analysis_type {
            AnalysisType::Text => self.detect_text(image).await?,
            _ => self.detect_labels(image).await?,
        };

        Ok(VisionFindings {
            findings,
            confidence: REAL_CONFIDENCE,
        })
    }

    fn service_name(&self) -> &'static str {
        Vendor::Rekognition.as_str()
    }
}
