/*!
 * Error types for the doc-translate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending the request or reading the body fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider did not answer within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx HTTP status
    #[error("HTTP error: {status_code} - {message}")]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Error reported by the provider in the response body
    #[error("API responded with error: {code} - {message}")]
    ApiError {
        /// Provider error code (e.g. "54001")
        code: String,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

/// Errors raised while turning a stored file into plain text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file content could not be read
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF library rejected the file
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// The DOCX archive or its XML is malformed
    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    /// The blocking extraction task panicked or was cancelled
    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Caller-facing failure kinds of a translation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidArgument,
    UnsupportedContent,
    ExtractionFailed,
    TranslationFailed,
    Storage,
}

impl ErrorKind {
    /// Stable identifier used in error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidArgument => "invalid_argument",
            Self::UnsupportedContent => "unsupported_content",
            Self::ExtractionFailed => "extraction_failed",
            Self::TranslationFailed => "translation_failed",
            Self::Storage => "storage_error",
        }
    }

    /// Whether the failure is the server's fault rather than the caller's
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ExtractionFailed | Self::TranslationFailed | Self::Storage)
    }
}

/// Errors that can occur while translating a document
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Document or main file absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requester may not read the document
    #[error("Access to the document is forbidden")]
    Forbidden,

    /// Unknown content source, blank text or bad language code
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The main file has a format no extractor handles
    #[error("Unsupported content: {0}")]
    UnsupportedContent(String),

    /// The extractor failed on a supported format
    #[error("Content extraction failed: {0}")]
    ExtractionFailed(#[from] ExtractionError),

    /// The provider call failed
    #[error("Translation failed: {0}")]
    TranslationFailed(#[from] ProviderError),

    /// The document store could not be queried
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TranslationError {
    /// The failure kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::UnsupportedContent(_) => ErrorKind::UnsupportedContent,
            Self::ExtractionFailed(_) => ErrorKind::ExtractionFailed,
            Self::TranslationFailed(_) => ErrorKind::TranslationFailed,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Message safe to hand back to the caller.
    ///
    /// Server-side failures collapse to a generic text so provider codes,
    /// library messages and paths stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(what) => format!("Not found: {}", what),
            Self::Forbidden => "Forbidden".to_string(),
            Self::InvalidArgument(msg) | Self::UnsupportedContent(msg) => msg.clone(),
            Self::ExtractionFailed(_) | Self::TranslationFailed(_) | Self::Storage(_) => {
                "Error translating document".to_string()
            }
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
