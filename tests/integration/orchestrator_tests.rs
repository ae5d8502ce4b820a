/*!
 * End-to-end tests of the translation orchestrator over an in-memory store
 */

use anyhow::Result;
use std::sync::Arc;

use doc_translate::documents::Requester;
use doc_translate::errors::{ProviderError, TranslationError};
use doc_translate::providers::MockProvider;
use doc_translate::translation::TranslationResult;

use crate::common::{self, log_capture};

fn owner() -> Requester {
    Requester::new(common::OWNER)
}

fn reader() -> Requester {
    Requester::new(common::READER).with_groups([common::READERS_GROUP])
}

#[tokio::test]
async fn test_translate_description_shouldReturnProviderText() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let provider = MockProvider::with_body(r#"{"trans_result":[{"src":"Hello","dst":"Bonjour"}]}"#);
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let result = orchestrator.translate(&reader(), "doc-desc", "fr", "description").await?;

    assert_eq!(result, TranslationResult { translated: "Bonjour".to_string() });
    assert_eq!(serde_json::to_string(&result)?, r#"{"translated":"Bonjour"}"#);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text(), "Hello");
    assert_eq!(requests[0].source_language(), "auto");
    assert_eq!(requests[0].target_language(), "fr");
    Ok(())
}

#[tokio::test]
async fn test_translate_isRepeatable() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let provider = MockProvider::with_body(r#"{"trans_result":[{"src":"Hello","dst":"Bonjour"}]}"#);
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let first = orchestrator.translate(&owner(), "doc-desc", "fr", "description").await?;
    let second = orchestrator.translate(&owner(), "doc-desc", "fr", "description").await?;

    assert_eq!(first, second);
    assert_eq!(provider.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_translate_unknownDocument_shouldBeNotFound() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let err = orchestrator
        .translate(&owner(), "missing", "fr", "description")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::NotFound(_)));
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translate_withoutReadAccess_shouldBeForbiddenForEverySource() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));
    let stranger = Requester::new(common::STRANGER);

    for source in ["description", "file", "title", ""] {
        let err = orchestrator
            .translate(&stranger, "doc-private", "fr", source)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::Forbidden), "source {:?}", source);
    }

    // Group grant on another document does not leak here
    let err = orchestrator
        .translate(&reader(), "doc-private", "fr", "description")
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Forbidden));

    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translate_invalidContentSource_shouldBeInvalidArgument() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let orchestrator = common::orchestrator(&repository, Arc::new(MockProvider::canned()));

    let err = orchestrator
        .translate(&owner(), "doc-desc", "fr", "title")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::InvalidArgument(ref msg) if msg == "invalid content source"));
    Ok(())
}

#[tokio::test]
async fn test_translate_emptyDescription_shouldNotCallProvider() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let err = orchestrator
        .translate(&owner(), "doc-empty", "fr", "description")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::InvalidArgument(ref msg) if msg == "no text to translate"));
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translate_invalidTargetLanguage_shouldNotCallProvider() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    for target in ["", "auto", "xx"] {
        let err = orchestrator
            .translate(&owner(), "doc-desc", target, "description")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::InvalidArgument(ref msg) if msg == "invalid target language"));
    }
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translate_fileWithoutFiles_shouldBeNotFound() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let orchestrator = common::orchestrator(&repository, Arc::new(MockProvider::canned()));

    let err = orchestrator
        .translate(&owner(), "doc-nofile", "fr", "file")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::NotFound(ref what) if what == "no file for document"));
    Ok(())
}

#[tokio::test]
async fn test_translate_textFile_shouldBeUnsupported() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let repository = common::seeded_repository().await?;
    common::add_file_document(&repository, dir.path(), "doc-txt", "notes.txt", b"Some notes").await?;

    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let err = orchestrator
        .translate(&owner(), "doc-txt", "fr", "file")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::UnsupportedContent(_)));
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translate_docxFile_shouldSendExtractedText() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let repository = common::seeded_repository().await?;
    let docx = common::build_docx(&["Hello", "World"])?;
    common::add_file_document(&repository, dir.path(), "doc-docx", "letter.docx", &docx).await?;

    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let result = orchestrator.translate(&owner(), "doc-docx", "zh", "file").await?;

    assert_eq!(result.translated, "这是翻译后的中文文本: Hello\nWorld");
    assert_eq!(provider.requests()[0].text(), "Hello\nWorld");
    Ok(())
}

#[tokio::test]
async fn test_translate_corruptPdf_shouldBeExtractionFailure() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let repository = common::seeded_repository().await?;
    common::add_file_document(&repository, dir.path(), "doc-pdf", "scan.pdf", b"garbage").await?;

    let provider = MockProvider::canned();
    let orchestrator = common::orchestrator(&repository, Arc::new(provider.clone()));

    let err = orchestrator
        .translate(&owner(), "doc-pdf", "fr", "file")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::ExtractionFailed(_)));
    assert_eq!(err.public_message(), "Error translating document");
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translate_providerApiError_shouldOnlyBeLogged() -> Result<()> {
    log_capture::install();

    let repository = common::seeded_repository().await?;
    let provider = MockProvider::with_body(r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#);
    let orchestrator = common::orchestrator(&repository, Arc::new(provider));

    let err = orchestrator
        .translate(&owner(), "doc-desc", "fr", "description")
        .await
        .unwrap_err();

    match &err {
        TranslationError::TranslationFailed(ProviderError::ApiError { code, message }) => {
            assert_eq!(code, "54001");
            assert_eq!(message, "Invalid Sign");
        }
        other => panic!("Expected TranslationFailed(ApiError), got {:?}", other),
    }

    assert_eq!(err.public_message(), "Error translating document");
    assert!(!err.public_message().contains("54001"));
    assert!(log_capture::contains("54001"));
    assert!(log_capture::contains("Invalid Sign"));
    Ok(())
}

#[tokio::test]
async fn test_translate_failingProvider_shouldBeTranslationFailed() -> Result<()> {
    let repository = common::seeded_repository().await?;
    let orchestrator = common::orchestrator(&repository, Arc::new(MockProvider::failing()));

    let err = orchestrator
        .translate(&owner(), "doc-desc", "fr", "description")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::TranslationFailed(_)));
    Ok(())
}
