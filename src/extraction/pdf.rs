/*!
 * PDF text extraction backed by `pdf-extract`.
 */

use super::{ContentExtractor, FileFormat};
use crate::errors::ExtractionError;

/// Extracts the text layer of a PDF, pages in order
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl ContentExtractor for PdfExtractor {
    fn format(&self) -> FileFormat {
        FileFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(format!("{:?}", e)))
    }
}
