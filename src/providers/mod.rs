/*!
 * Provider implementations for machine translation services.
 *
 * This module contains client implementations for:
 * - Baidu: Baidu Translate general text API
 * - Mock: offline provider with scripted behavior
 */

use async_trait::async_trait;
use log::info;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{AppError, ProviderError};
use crate::translation::TranslationRequest;

pub mod baidu;
pub mod mock;

pub use baidu::{Baidu, BaiduCredentials};
pub use mock::{MockBehavior, MockProvider};

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the orchestrator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate the request's text
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - Only the translated text, or an error
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider with a tiny request
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Build the configured provider
pub fn create_provider(config: &TranslationConfig) -> Result<Arc<dyn Provider>, AppError> {
    let provider: Arc<dyn Provider> = match config.provider {
        TranslationProvider::Baidu => {
            let credentials =
                BaiduCredentials::new(&config.baidu.app_id, &config.baidu.secret_key)?;
            Arc::new(Baidu::new(
                credentials,
                &config.baidu.endpoint,
                config.baidu.timeout_secs,
            ))
        }
        TranslationProvider::Mock => Arc::new(MockProvider::canned()),
    };

    info!("Using translation provider: {}", config.provider.display_name());
    Ok(provider)
}
