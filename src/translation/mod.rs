//! Translation of finished transcripts
//!
//! Served over `POST /api/translate`; independent of the relay.

mod client;
mod error;
mod fallback;
mod language;
mod service;

pub use client::GeminiClient;
pub use error::TranslationError;
pub use fallback::simulate_translation;
pub use language::TargetLanguage;
pub use service::{Translation, TranslationService};
