use super::client::GeminiClient;
use super::error::TranslationError;
use super::fallback::simulate_translation;
use super::language::TargetLanguage;
use crate::config::TranslationConfig;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Produced by the offline fallback rather than the model
    pub simulated: bool,
}

/// Portuguese → target language translation with an offline fallback
pub struct TranslationService {
    client: Option<GeminiClient>,
    source_language: String,
}

impl TranslationService {
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let client = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Some(GeminiClient::new(config, key.to_string())?),
            _ => {
                warn!("No Gemini API key configured, translations will be simulated");
                None
            }
        };

        Ok(Self {
            client,
            source_language: config.source_language.clone(),
        })
    }

    /// Service that only ever uses the offline fallback
    pub fn offline(source_language: impl Into<String>) -> Self {
        Self {
            client: None,
            source_language: source_language.into(),
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    pub async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<Translation, TranslationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslationError::EmptyText);
        }

        if let Some(client) = &self.client {
            match client.translate(text, target).await {
                Ok(translated) => {
                    info!("Translated {} characters into {}", text.len(), target);
                    return Ok(Translation {
                        text: translated,
                        simulated: false,
                    });
                }
                Err(e) => warn!("Gemini translation failed, using simulation: {}", e),
            }
        }

        Ok(Translation {
            text: simulate_translation(text, target),
            simulated: true,
        })
    }
}
