/*!
 * Document store interfaces.
 *
 * The translation pipeline never talks to storage directly. It reads through
 * these two narrow traits, implemented for SQLite by `database::Repository`
 * and easy to fake in tests.
 */

use anyhow::Result;
use async_trait::async_trait;

pub mod model;

pub use model::{AclEntry, Document, Permission, Requester, StoredFile};

/// Read access to documents and their files
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a live document with its ACL, `None` when absent or deleted
    async fn get_document(&self, document_id: &str) -> Result<Option<Document>>;

    /// The document's main file: the first live file in upload order
    async fn get_main_file(&self, document_id: &str) -> Result<Option<StoredFile>>;
}

/// Resolution of authentication tokens to requesters
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a token to the user and groups it authenticates
    async fn resolve_token(&self, token: &str) -> Result<Option<Requester>>;
}
