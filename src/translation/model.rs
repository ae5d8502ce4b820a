/*!
 * Values passed through the translation pipeline.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TranslationError;
use crate::language_utils::{self, AUTO_LANGUAGE};

/// Where the text to translate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// The document's description field
    Description,
    /// Text extracted from the document's main file
    File,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => write!(f, "description"),
            Self::File => write!(f, "file"),
        }
    }
}

impl FromStr for ContentSource {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(Self::Description),
            "file" => Ok(Self::File),
            _ => Err(TranslationError::InvalidArgument("invalid content source".to_string())),
        }
    }
}

/// A validated request to a translation provider.
///
/// The text is never blank and the target is a recognised language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_language: String,
    target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Result<Self, TranslationError> {
        let text = text.into();
        let source_language = source_language.into();
        let target_language = target_language.into();

        if text.trim().is_empty() {
            return Err(TranslationError::InvalidArgument("no text to translate".to_string()));
        }

        if language_utils::validate_target_language(&target_language).is_err() {
            return Err(TranslationError::InvalidArgument("invalid target language".to_string()));
        }

        if source_language != AUTO_LANGUAGE
            && language_utils::to_provider_code(&source_language).is_err()
        {
            return Err(TranslationError::InvalidArgument("invalid source language".to_string()));
        }

        Ok(Self {
            text,
            source_language,
            target_language,
        })
    }

    /// Request with source language detection
    pub fn auto_detect(
        text: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Result<Self, TranslationError> {
        Self::new(text, AUTO_LANGUAGE, target_language)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}

/// Outcome of a successful translation, serialized as `{"translated": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated: String,
}
