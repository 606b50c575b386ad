use super::error::TranslationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the translation endpoint accepts as a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Fr,
    En,
    Es,
    De,
    It,
    Pt,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::Fr,
        TargetLanguage::En,
        TargetLanguage::Es,
        TargetLanguage::De,
        TargetLanguage::It,
        TargetLanguage::Pt,
    ];

    /// Parse an ISO 639-1 code, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Result<Self, TranslationError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(TargetLanguage::Fr),
            "en" => Ok(TargetLanguage::En),
            "es" => Ok(TargetLanguage::Es),
            "de" => Ok(TargetLanguage::De),
            "it" => Ok(TargetLanguage::It),
            "pt" => Ok(TargetLanguage::Pt),
            _ => Err(TranslationError::UnsupportedLanguage(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::Fr => "fr",
            TargetLanguage::En => "en",
            TargetLanguage::Es => "es",
            TargetLanguage::De => "de",
            TargetLanguage::It => "it",
            TargetLanguage::Pt => "pt",
        }
    }

    /// English name, used in the model prompt
    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::Fr => "French",
            TargetLanguage::En => "English",
            TargetLanguage::Es => "Spanish",
            TargetLanguage::De => "German",
            TargetLanguage::It => "Italian",
            TargetLanguage::Pt => "Portuguese",
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
