/*!
 * Document translation pipeline.
 *
 * - `model`: request, result and content source values
 * - `orchestrator`: fetch, access check, text resolution and provider call
 */

pub mod model;
pub mod orchestrator;

pub use self::model::{ContentSource, TranslationRequest, TranslationResult};
pub use self::orchestrator::TranslationOrchestrator;
