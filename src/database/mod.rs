/*!
 * Database module backing the document store.
 *
 * This module provides SQLite-based access to:
 * - Documents, their files and ACL grants
 * - Group membership and authentication tokens
 */

pub mod schema;
pub mod connection;
pub mod repository;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
