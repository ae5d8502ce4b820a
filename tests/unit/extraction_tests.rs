/*!
 * Tests for content extraction from stored files
 */

use anyhow::Result;
use doc_translate::documents::StoredFile;
use doc_translate::errors::TranslationError;
use doc_translate::extraction::{ContentExtractor, DocxExtractor, ExtractorRegistry, FileFormat};

use crate::common;

#[test]
fn test_docxExtractor_shouldReadParagraphs() -> Result<()> {
    let bytes = common::build_docx(&["First paragraph", "Second paragraph"])?;
    let text = DocxExtractor.extract(&bytes)?;
    assert_eq!(text, "First paragraph\nSecond paragraph");
    Ok(())
}

#[test]
fn test_docxExtractor_withoutDocumentPart_shouldFail() -> Result<()> {
    use std::io::Write;

    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())?;
        zip.write_all(b"not a word document")?;
        zip.finish()?;
    }

    assert!(DocxExtractor.extract(buffer.get_ref()).is_err());
    Ok(())
}

#[tokio::test]
async fn test_registry_shouldExtractDocxFromDisk() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "letter.docx", &common::build_docx(&["Dear reader"])?)?;
    let file = StoredFile::new("f1", "d1", &path);

    let text = ExtractorRegistry::with_defaults().extract(&file).await?;
    assert_eq!(text, "Dear reader");
    Ok(())
}

#[tokio::test]
async fn test_registry_withCorruptPdf_shouldReportExtractionFailure() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "broken.pdf", b"definitely not a pdf")?;
    let file = StoredFile::new("f1", "d1", &path).with_mime_type("application/pdf");

    let err = ExtractorRegistry::with_defaults().extract(&file).await.unwrap_err();
    assert!(matches!(err, TranslationError::ExtractionFailed(_)));
    Ok(())
}

#[tokio::test]
async fn test_registry_withMissingFile_shouldReportExtractionFailure() {
    let file = StoredFile::new("f1", "d1", "/nonexistent/dir/gone.docx");

    let err = ExtractorRegistry::with_defaults().extract(&file).await.unwrap_err();
    assert!(matches!(err, TranslationError::ExtractionFailed(_)));
}

#[tokio::test]
async fn test_registry_withTextFile_shouldBeUnsupported() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "notes.txt", b"plain text")?;
    let file = StoredFile::new("f1", "d1", &path).with_mime_type("text/plain");

    let err = ExtractorRegistry::with_defaults().extract(&file).await.unwrap_err();
    assert!(matches!(err, TranslationError::UnsupportedContent(_)));
    assert_eq!(err.public_message(), "unsupported file type: text/plain");
    Ok(())
}

#[derive(Debug)]
struct PanickingExtractor;

impl ContentExtractor for PanickingExtractor {
    fn format(&self) -> FileFormat {
        FileFormat::Pdf
    }

    fn extract(&self, _bytes: &[u8]) -> Result<String, doc_translate::errors::ExtractionError> {
        panic!("extractor bug");
    }
}

#[tokio::test]
async fn test_registry_withPanickingExtractor_shouldReportExtractionFailure() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "any.pdf", b"%PDF-1.4")?;
    let file = StoredFile::new("f1", "d1", &path);

    let mut registry = ExtractorRegistry::new();
    registry.register(std::sync::Arc::new(PanickingExtractor));

    let err = registry.extract(&file).await.unwrap_err();
    assert!(matches!(err, TranslationError::ExtractionFailed(_)));
    Ok(())
}
