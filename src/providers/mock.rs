/*!
 * Mock provider implementations for testing.
 *
 * This module provides a provider that simulates different behaviors:
 * - `MockProvider::canned()` - Prefixes the text with a fixed phrase per target language
 * - `MockProvider::with_body()` - Answers with a raw Baidu-style JSON body
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::slow()` - Answers after a delay
 *
 * Every request is recorded so tests can assert what reached the provider.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::baidu::Baidu;
use super::Provider;
use crate::errors::ProviderError;
use crate::translation::TranslationRequest;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Fixed phrase followed by the original text
    Canned,
    /// Decode the given body as a Baidu response
    Body(String),
    /// Always fails with an API error
    Failing,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Shared between clones
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<TranslationRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn canned() -> Self {
        Self::new(MockBehavior::Canned)
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self::new(MockBehavior::Body(body.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copies of all requests received, oldest first
    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().clone()
    }

    /// The canned translation for a text and target language
    pub fn canned_translation(text: &str, target_language: &str) -> String {
        match target_language {
            "zh" => format!("这是翻译后的中文文本: {}", text),
            "en" => format!("This is the translated English text: {}", text),
            _ => format!("Translated text: {}", text),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match &self.behavior {
            MockBehavior::Canned => Ok(Self::canned_translation(
                request.text(),
                request.target_language(),
            )),

            MockBehavior::Body(body) => {
                let response = Baidu::parse_response(body)?;
                Baidu::extract_text(&response)
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                code: "52001".to_string(),
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(Self::canned_translation(request.text(), request.target_language()))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
