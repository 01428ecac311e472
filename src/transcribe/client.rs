use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encoder::EncoderProfile;
use crate::error::CaptureError;
use crate::recorder::ArtifactLocation;

use super::upload::UploadStrategy;

/// Recognized text returned by the transcription backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    /// Rarely populated by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Error body shape of the transcription backend.
/// Parsed tolerantly; any field may be missing.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}

/// Client for the remote transcription backend.
///
/// Packages a finished artifact as a multipart upload and interprets the
/// response. Carries no retry policy; the only timeout is the optional one
/// configured on the HTTP client, so callers wanting a deadline wrap the
/// call in their own.
pub struct TranscriptionClient {
    http: reqwest::Client,
    base_url: String,
    profile: EncoderProfile,
    strategy: Box<dyn UploadStrategy>,
}

impl TranscriptionClient {
    /// Build a client for `base_url`.
    ///
    /// `timeout` bounds the whole upload+response round trip when set;
    /// when `None` the call can suspend indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        profile: EncoderProfile,
        strategy: Box<dyn UploadStrategy>,
        timeout: Option<Duration>,
    ) -> Result<Self, CaptureError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile,
            strategy,
        })
    }

    /// Upload the artifact and return the recognized text.
    ///
    /// Verifies the artifact still exists first; a missing artifact fails
    /// with [`CaptureError::ArtifactNotFound`] before any network traffic.
    pub async fn transcribe_audio(
        &self,
        location: &ArtifactLocation,
    ) -> Result<TranscriptionResult, CaptureError> {
        if !self.strategy.exists(location).await {
            return Err(CaptureError::ArtifactNotFound(location.to_string()));
        }

        let form = self
            .strategy
            .attach(
                location,
                &self.profile.upload_file_name(),
                self.profile.mime_type(),
            )
            .await?;

        let url = format!("{}/transcribe", self.base_url);
        info!(
            "uploading {location} to {url} ({} strategy)",
            self.strategy.name()
        );

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("transcription service returned {status}"));
            warn!("transcription rejected ({status}): {message}");
            return Err(CaptureError::TranscriptionFailed(message));
        }

        let result: TranscriptionResult = serde_json::from_str(&body)
            .map_err(|e| CaptureError::MalformedResponse(e.to_string()))?;

        info!("transcription succeeded ({} chars)", result.text.len());
        Ok(result)
    }
}
