/*!
 * Plain-text extraction from stored files.
 *
 * Formats are detected from the recorded MIME type first and the file
 * extension second. Each supported format has a `ContentExtractor`, looked
 * up through an `ExtractorRegistry` so new formats plug in without touching
 * the orchestrator.
 */

use log::debug;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::path::Path;
use std::sync::Arc;

use crate::documents::StoredFile;
use crate::errors::{ExtractionError, TranslationError};

pub mod docx;
pub mod pdf;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// File formats the pipeline can recognise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Pdf,
    Docx,
    /// Anything else, carrying the MIME type or extension that identified it
    Other(String),
}

impl FileFormat {
    /// Detect the format of a stored file
    pub fn detect(file: &StoredFile) -> Self {
        if let Some(mime) = file.mime_type.as_deref() {
            let mime = mime.trim().to_lowercase();
            match mime.as_str() {
                PDF_MIME => return Self::Pdf,
                DOCX_MIME => return Self::Docx,
                "" | "application/octet-stream" => {}
                _ => return Self::Other(mime),
            }
        }

        let extension = file
            .name
            .as_deref()
            .and_then(|name| Self::extension_of(Path::new(name)))
            .or_else(|| Self::extension_of(&file.path));

        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other("unknown".to_string()),
        }
    }

    fn extension_of(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Other(what) => write!(f, "{}", what),
        }
    }
}

/// Turns the raw bytes of one file format into plain text
pub trait ContentExtractor: Send + Sync + Debug {
    /// The format this extractor handles
    fn format(&self) -> FileFormat;

    /// Extract the text content. Called on a blocking thread.
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Maps file formats to their extractor
#[derive(Debug, Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<FileFormat, Arc<dyn ContentExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the PDF and DOCX extractors
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfExtractor));
        registry.register(Arc::new(DocxExtractor));
        registry
    }

    /// Register an extractor, replacing any previous one for its format
    pub fn register(&mut self, extractor: Arc<dyn ContentExtractor>) {
        self.extractors.insert(extractor.format(), extractor);
    }

    pub fn get(&self, format: &FileFormat) -> Option<Arc<dyn ContentExtractor>> {
        self.extractors.get(format).cloned()
    }

    /// Read the file from disk and extract its text.
    ///
    /// The format is checked before any I/O, so an unsupported file never
    /// gets read.
    pub async fn extract(&self, file: &StoredFile) -> Result<String, TranslationError> {
        let format = FileFormat::detect(file);
        let extractor = self.get(&format).ok_or_else(|| {
            TranslationError::UnsupportedContent(format!("unsupported file type: {}", format))
        })?;

        debug!("Extracting {} text from file {}", format, file.id);

        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(ExtractionError::from)?;

        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        debug!("Extracted {} characters from file {}", text.chars().count(), file.id);
        Ok(text)
    }
}
