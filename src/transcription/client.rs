use super::error::TranscriptionError;
use super::gateway::TranscriptionGateway;
use crate::config::TranscriptionConfig;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const AUDIO_FILENAME: &str = "audio.webm";
const AUDIO_MIME: &str = "audio/webm";

/// `GET /health` answer of the STT service
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub stt_ready: bool,
}

impl HealthResponse {
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.stt_ready
    }
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Whisper STT service
#[derive(Debug, Clone)]
pub struct HttpTranscriptionGateway {
    client: reqwest::Client,
    base_url: String,
    config: TranscriptionConfig,
}

impl HttpTranscriptionGateway {
    pub fn new(config: &TranscriptionConfig) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TranscriptionError::Request)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single `/health` probe
    pub async fn health_check(&self) -> Result<HealthResponse, TranscriptionError> {
        let url = format!("{}/health", self.base_url);
        let timeout = Duration::from_secs(self.config.health_timeout_secs);

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TranscriptionError::from_request(e, timeout))?;

        if !response.status().is_success() {
            return Err(TranscriptionError::Upstream {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))
    }

    /// Probe `/health` until the service reports ready
    ///
    /// Retries cover the STT service still loading its model when the relay
    /// starts first.
    pub async fn wait_until_ready(&self) -> Result<(), TranscriptionError> {
        let attempts = self.config.health_retries.max(1);
        let delay = Duration::from_millis(self.config.health_retry_delay_ms);

        for attempt in 1..=attempts {
            match self.health_check().await {
                Ok(health) if health.is_ready() => return Ok(()),
                Ok(health) => {
                    debug!(
                        "STT service not ready (status={}, stt_ready={}), attempt {}/{}",
                        health.status, health.stt_ready, attempt, attempts
                    );
                }
                Err(e) => {
                    debug!("STT health check failed, attempt {}/{}: {}", attempt, attempts, e);
                }
            }

            if attempt < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        warn!("STT service at {} is not available", self.base_url);
        Err(TranscriptionError::Unavailable(format!(
            "speech-to-text service at {} is not available; start the STT service and retry",
            self.base_url
        )))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    async fn post_audio(&self, audio: Vec<u8>) -> Result<String, TranscriptionError> {
        let url = format!("{}/api/stt/transcribe", self.base_url);
        let size = audio.len();

        let part = Part::bytes(audio)
            .file_name(AUDIO_FILENAME)
            .mime_str(AUDIO_MIME)
            .map_err(TranscriptionError::Request)?;

        let form = Form::new()
            .part("file", part)
            .text("language", self.config.language.clone())
            .text("task", self.config.task.clone())
            .text("temperature", format!("{:.1}", self.config.temperature));

        info!("Sending {} bytes to STT service at {}", size, url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::from_request(e, self.request_timeout()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptionError::Upstream {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: TranscribeResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranscriptionError::Timeout {
                    after: self.request_timeout(),
                }
            } else {
                TranscriptionError::InvalidResponse(e.to_string())
            }
        })?;

        let text = body.text.unwrap_or_default();
        debug!("STT service returned {} characters", text.len());
        Ok(text)
    }
}

#[async_trait::async_trait]
impl TranscriptionGateway for HttpTranscriptionGateway {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        if self.config.health_check {
            self.wait_until_ready().await?;
        }

        self.post_audio(audio).await
    }

    fn name(&self) -> &str {
        "whisper-http"
    }
}
