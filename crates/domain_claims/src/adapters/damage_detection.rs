//! Damage Detection Adapter
//!
//! Sends the claim photo to the damage detection service and decodes its
//! assessment. The service takes a multipart `POST {base_url}/detect` with
//! two parts:
//!
//! - `image`: the photo bytes, with file name and content type
//! - `claim_id`: the 12-digit claim number
//!
//! and answers with a JSON `DamageAssessment` (camelCase keys).
//!
//! # Error Handling
//!
//! Any non-success response fails the assessment:
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Other -> `PortError::Internal`

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, ClaimNumber, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::assessment::DamageAssessment;
use crate::draft::AttachedImage;
use crate::ports::DamageAssessor;

const ADAPTER_ID: &str = "damage-detection-http";
const DETECT_OPERATION: &str = "damage detection";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the damage detection service
#[derive(Debug, Clone)]
pub struct DamageDetectionConfig {
    /// Base URL of the service; `/detect` is appended. Empty means unconfigured.
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DamageDetectionConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl DamageDetectionConfig {
    /// Request timeout in milliseconds, clamped at `u64::MAX`
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_secs.saturating_mul(1000)
    }

    /// Full URL of the detect endpoint
    pub fn detect_url(&self) -> Result<Url, PortError> {
        if self.base_url.trim().is_empty() {
            return Err(PortError::ServiceUnavailable {
                service: "damage detection URL is not configured".to_string(),
            });
        }
        let endpoint = format!("{}/detect", self.base_url.trim_end_matches('/'));
        Url::parse(&endpoint)
            .map_err(|err| PortError::validation(format!("invalid damage detection URL '{}': {}", endpoint, err)))
    }
}

/// Damage assessor backed by the HTTP damage detection service
#[derive(Debug, Clone)]
pub struct HttpDamageAssessor {
    config: DamageDetectionConfig,
    client: Client,
}

impl HttpDamageAssessor {
    /// Builds the adapter and its HTTP client
    pub fn new(config: DamageDetectionConfig) -> Result<Self, PortError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(err)),
            })?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DamageDetectionConfig {
        &self.config
    }

    fn transport_error(&self, err: reqwest::Error) -> PortError {
        if err.is_timeout() {
            PortError::Timeout {
                operation: DETECT_OPERATION.to_string(),
                duration_ms: self.config.timeout_ms(),
            }
        } else if err.is_connect() {
            PortError::Connection {
                message: "could not reach damage detection service".to_string(),
                source: Some(Box::new(err)),
            }
        } else {
            PortError::Internal {
                message: "damage detection request failed".to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Maps a non-success HTTP status to the port error it stands for
pub fn error_for_status(status: StatusCode, retry_after_secs: Option<u64>) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("damage detection rejected credentials ({})", status),
        },
        StatusCode::NOT_FOUND => PortError::not_found("Endpoint", "/detect"),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after_secs.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("damage detection ({})", s),
        },
        s => PortError::internal(format!("damage detection returned {}", s)),
    }
}

impl DomainPort for HttpDamageAssessor {}

#[async_trait]
impl HealthCheckable for HttpDamageAssessor {
    /// Reports whether the service is configured; no request is sent
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let (status, message) = match self.config.detect_url() {
            Ok(url) => (AdapterHealth::Healthy, format!("configured at {}", url)),
            Err(err) => (AdapterHealth::Unhealthy, err.to_string()),
        };
        HealthCheckResult::now(
            ADAPTER_ID,
            status,
            start.elapsed().as_millis() as u64,
            Some(message),
        )
    }
}

#[async_trait]
impl DamageAssessor for HttpDamageAssessor {
    #[instrument(skip(self, image), fields(claim_id = %claim_id, bytes = image.len()))]
    async fn assess(
        &self,
        image: &AttachedImage,
        claim_id: &ClaimNumber,
    ) -> Result<DamageAssessment, PortError> {
        let url = self.config.detect_url()?;

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.content_type())
            .map_err(|err| PortError::validation(format!("invalid image content type: {}", err)))?;
        let form = Form::new()
            .part("image", part)
            .text("claim_id", claim_id.to_string());

        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        debug!(%status, elapsed_ms = started.elapsed().as_millis() as u64, "Damage detection responded");

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            let err = error_for_status(status, retry_after);
            warn!(%status, error = %err, "Damage detection failed");
            return Err(err);
        }

        response
            .json::<DamageAssessment>()
            .await
            .map_err(|err| PortError::transformation(format!("unreadable damage assessment: {}", err)))
    }
}
