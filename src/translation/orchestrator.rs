/*!
 * Translation of a stored document on behalf of a requester.
 *
 * The orchestrator fetches the document, checks read access, resolves the
 * text from the requested content source and hands it to the provider.
 * Nothing is written back: each call is read-only and independent.
 */

use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::model::{ContentSource, TranslationRequest, TranslationResult};
use crate::access::AccessGate;
use crate::documents::{Document, DocumentStore, Requester};
use crate::errors::TranslationError;
use crate::extraction::ExtractorRegistry;
use crate::language_utils;
use crate::providers::Provider;

/// Coordinates storage, access control, extraction and the provider
#[derive(Clone)]
pub struct TranslationOrchestrator {
    store: Arc<dyn DocumentStore>,
    gate: Arc<dyn AccessGate>,
    extractors: Arc<ExtractorRegistry>,
    provider: Arc<dyn Provider>,
}

impl TranslationOrchestrator {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        gate: Arc<dyn AccessGate>,
        extractors: ExtractorRegistry,
        provider: Arc<dyn Provider>,
    ) -> Self {
        Self {
            store,
            gate,
            extractors: Arc::new(extractors),
            provider,
        }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Translate a document's description or main file into `target_language`
    pub async fn translate(
        &self,
        requester: &Requester,
        document_id: &str,
        target_language: &str,
        content_source: &str,
    ) -> Result<TranslationResult, TranslationError> {
        let document = self
            .store
            .get_document(document_id)
            .await
            .map_err(|e| Self::storage_error(document_id, e))?
            .ok_or_else(|| TranslationError::NotFound("document".to_string()))?;

        if !self.gate.can_read(&document, requester) {
            warn!(
                "User {} denied read access to document {}",
                requester.user_id, document.id
            );
            return Err(TranslationError::Forbidden);
        }

        let source: ContentSource = content_source.parse()?;
        let text = self.resolve_text(&document, source).await?;

        let request = TranslationRequest::auto_detect(text, target_language)?;

        info!(
            "Translating {} of document {} to {}",
            source,
            document.id,
            language_utils::get_language_name(target_language)
                .unwrap_or_else(|_| target_language.to_string())
        );

        let started = Instant::now();
        match self.provider.translate(&request).await {
            Ok(translated) => {
                debug!(
                    "Provider {} answered in {:?} ({} chars)",
                    self.provider.name(),
                    started.elapsed(),
                    translated.chars().count()
                );
                Ok(TranslationResult { translated })
            }
            Err(e) => {
                error!(
                    "Translation of document {} by {} failed: {}",
                    document.id,
                    self.provider.name(),
                    e
                );
                Err(TranslationError::TranslationFailed(e))
            }
        }
    }

    async fn resolve_text(
        &self,
        document: &Document,
        source: ContentSource,
    ) -> Result<String, TranslationError> {
        match source {
            ContentSource::Description => Ok(document.description.clone()),
            ContentSource::File => {
                let file = self
                    .store
                    .get_main_file(&document.id)
                    .await
                    .map_err(|e| Self::storage_error(&document.id, e))?
                    .ok_or_else(|| TranslationError::NotFound("no file for document".to_string()))?;

                self.extractors.extract(&file).await.inspect_err(|e| {
                    if let TranslationError::ExtractionFailed(cause) = e {
                        error!("Extraction of file {} failed: {}", file.id, cause);
                    }
                })
            }
        }
    }

    fn storage_error(document_id: &str, e: anyhow::Error) -> TranslationError {
        error!("Document store failed for {}: {:#}", document_id, e);
        TranslationError::Storage(e.to_string())
    }
}
