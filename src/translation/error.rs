use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Text required")]
    EmptyText,

    #[error("unsupported target language: {0}")]
    UnsupportedLanguage(String),

    #[error("Gemini API returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("no Gemini model available; check the API key and the configured models")]
    NoModelAvailable,

    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),
}
