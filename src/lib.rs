/*!
 * # doc-translate - on-demand translation of stored documents
 *
 * Translates the description or the main file of a stored document into a
 * target language through a machine translation API, after checking that
 * the caller may read the document.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `documents`: Document model and the store traits the pipeline reads through
 * - `database`: SQLite implementation of the stores
 * - `access`: Read-access decisions
 * - `extraction`: PDF and DOCX text extraction
 * - `providers`: Translation API clients:
 *   - `providers::baidu`: Baidu Translate client
 *   - `providers::mock`: Offline provider for tests and demos
 * - `translation`: The orchestrator tying the pieces together
 * - `server`: HTTP endpoint
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod access;
pub mod app_config;
pub mod database;
pub mod documents;
pub mod errors;
pub mod extraction;
pub mod language_utils;
pub mod providers;
pub mod server;
pub mod translation;

// Re-export main types for easier usage
pub use access::{AccessGate, AclAccessGate};
pub use app_config::Config;
pub use documents::{Document, DocumentStore, Requester, SessionStore, StoredFile};
pub use errors::{AppError, ProviderError, TranslationError};
pub use extraction::ExtractorRegistry;
pub use providers::Provider;
pub use translation::{TranslationOrchestrator, TranslationRequest, TranslationResult};
