use anyhow::{ensure, Result};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `VOICE_RELAY_SERVICE__HTTP__PORT=8080`
pub const ENV_PREFIX: &str = "VOICE_RELAY";

/// Fallback source for `translation.api_key`
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub relay: RelayConfig,
    pub transcription: TranscriptionConfig,
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
    /// Directory of the built frontend, served for every non-API path
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Upper bound on one transcription call, health check included
    pub transcription_timeout_secs: u64,
    /// Largest recording buffered per session
    pub max_recording_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub base_url: String,
    /// Source language hint passed to the STT service
    pub language: String,
    pub task: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Probe `/health` before each transcription
    pub health_check: bool,
    pub health_retries: u32,
    pub health_retry_delay_ms: u64,
    pub health_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Gemini API key; without one every translation is simulated
    pub api_key: Option<String>,
    pub base_url: String,
    /// Candidate models, most preferred first
    pub models: Vec<String>,
    pub timeout_secs: u64,
    pub probe_timeout_secs: u64,
    /// Language tag reported alongside each translation
    pub source_language: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "voice-relay".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3001,
            static_dir: "frontend/dist".to_string(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            transcription_timeout_secs: 60,
            max_recording_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            language: "pt".to_string(),
            task: "transcribe".to_string(),
            temperature: 0.0,
            timeout_secs: 60,
            health_check: true,
            health_retries: 3,
            health_retry_delay_ms: 1000,
            health_timeout_secs: 5,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            models: [
                "gemini-2.0-flash",
                "gemini-1.5-flash",
                "gemini-1.5-pro",
                "gemini-1.5-flash-latest",
                "gemini-1.5-pro-latest",
                "gemini-pro",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
            timeout_secs: 30,
            probe_timeout_secs: 5,
            source_language: "pt-BR".to_string(),
        }
    }
}

impl Config {
    /// Load defaults, then `path` (if present), then `VOICE_RELAY_*` variables
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Config = settings.try_deserialize()?;

        if cfg.translation.api_key.is_none() {
            cfg.translation.api_key = std::env::var(GEMINI_API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.service.http.port != 0, "service.http.port must not be 0");
        ensure!(
            !self.transcription.base_url.trim().is_empty(),
            "transcription.base_url must be set"
        );
        ensure!(
            self.relay.transcription_timeout_secs > 0,
            "relay.transcription_timeout_secs must be greater than 0"
        );
        ensure!(
            self.transcription.timeout_secs > 0,
            "transcription.timeout_secs must be greater than 0"
        );
        ensure!(
            self.relay.max_recording_bytes > 0,
            "relay.max_recording_bytes must be greater than 0"
        );
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}
