use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{parse_word_records, AlignmentRequest, AlignmentSource};
use crate::alignment::WordTimestamp;
use crate::app_config::HttpAlignerConfig;
use crate::errors::AlignerError;

/// Request body sent to the aligner service
#[derive(Debug, Serialize)]
pub struct AlignRequestBody<'a> {
    /// Model identifier served by the endpoint
    model: &'a str,
    /// Audio path as seen by the service
    audio_path: String,
    /// Full transcript
    text: &'a str,
    /// Language name
    language: &'a str,
}

/// Client for an aligner service exposing `POST /align`.
///
/// The service must be able to read the audio path it receives.
#[derive(Debug, Clone)]
pub struct HttpAligner {
    /// Base URL of the service
    base_url: String,
    /// Model identifier forwarded with every request
    model: String,
    /// Request timeout in seconds
    timeout_secs: u64,
    /// HTTP client for making requests
    client: Client,
}

impl HttpAligner {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Result<Self, AlignerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AlignerError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout_secs,
            client,
        })
    }

    pub fn from_config(config: &HttpAlignerConfig) -> Result<Self, AlignerError> {
        Self::new(config.endpoint.clone(), config.model.clone(), config.timeout_secs)
    }

    /// Full URL of the align route
    pub fn align_url(&self) -> String {
        format!("{}/align", self.base_url)
    }

    fn map_send_error(&self, e: reqwest::Error) -> AlignerError {
        if e.is_timeout() {
            AlignerError::Timeout { secs: self.timeout_secs }
        } else if e.is_connect() {
            AlignerError::ConnectionError(format!("{}: {}", self.base_url, e))
        } else {
            AlignerError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl AlignmentSource for HttpAligner {
    async fn align(&self, request: &AlignmentRequest) -> Result<Vec<WordTimestamp>, AlignerError> {
        let url = self.align_url();
        let body = AlignRequestBody {
            model: &self.model,
            audio_path: request.audio.to_string_lossy().to_string(),
            text: &request.text,
            language: &request.language,
        };

        debug!("Sending alignment request to {} ({})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Aligner service error ({}): {}", status, error_text);
            return Err(AlignerError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AlignerError::ParseError(format!("Failed to read response body: {}", e)))?;

        parse_word_records(&response_text)
    }

    fn name(&self) -> &str {
        "http"
    }
}
