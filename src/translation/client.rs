use super::error::TranslationError;
use super::language::TargetLanguage;
use crate::config::TranslationConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const PROBE_PROMPT: &str = "Hello";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini `generateContent` client
///
/// The first configured model that answers a probe is cached and reused
/// until it starts returning 404.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    models: Vec<String>,
    probe_timeout: Duration,
    model: RwLock<Option<String>>,
}

impl GeminiClient {
    pub fn new(config: &TranslationConfig, api_key: String) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            models: config.models.clone(),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            model: RwLock::new(None),
        })
    }

    /// Model currently in use, if one has been resolved
    pub async fn current_model(&self) -> Option<String> {
        self.model.read().await.clone()
    }

    /// Translate Portuguese `text` into `target`
    pub async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, TranslationError> {
        let model = self.resolve_model().await?;
        let prompt = build_prompt(text, target);

        match self.generate(&model, &prompt, None).await {
            Ok(raw) => Ok(clean_translation(&raw)),
            Err(e) => {
                if matches!(e, TranslationError::Upstream { status: 404, .. }) {
                    warn!("Gemini model {} disappeared, probing again next time", model);
                    *self.model.write().await = None;
                }
                Err(e)
            }
        }
    }

    async fn resolve_model(&self) -> Result<String, TranslationError> {
        if let Some(model) = self.model.read().await.clone() {
            return Ok(model);
        }

        let mut cached = self.model.write().await;
        if let Some(model) = cached.clone() {
            return Ok(model);
        }

        for model in &self.models {
            match self
                .generate(model, PROBE_PROMPT, Some(self.probe_timeout))
                .await
            {
                Ok(_) => {
                    info!("Using Gemini model {}", model);
                    *cached = Some(model.clone());
                    return Ok(model.clone());
                }
                Err(e) => debug!("Gemini model {} unavailable: {}", model, e),
            }
        }

        warn!("No Gemini model available among {:?}", self.models);
        Err(TranslationError::NoModelAvailable)
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> Result<String, TranslationError> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let mut builder = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Upstream {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        body.candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| TranslationError::Upstream {
                status: status.as_u16(),
                body: "response contained no text".to_string(),
            })
    }
}

fn build_prompt(text: &str, target: TargetLanguage) -> String {
    format!(
        "Translate the following text from Portuguese to {}.\n\
         Reply ONLY with the translation, without comments or explanations.\n\n\
         Text to translate: \"{}\"\n\n\
         Translation:",
        target.name(),
        text
    )
}

/// Strip the decorations models like to add around a bare translation
pub(crate) fn clean_translation(raw: &str) -> String {
    let mut text = raw.trim();

    for label in ["translation:", "traduction:"] {
        if text
            .get(..label.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(label))
        {
            text = text[label.len()..].trim();
            break;
        }
    }

    // Only a matching pair counts as wrapping quotes
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].trim();
            break;
        }
    }

    text.to_string()
}
