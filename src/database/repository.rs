/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API over the document tables,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

use super::connection::DatabaseConnection;
use crate::documents::{AclEntry, Document, DocumentStore, Requester, SessionStore, StoredFile};

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Insert a document together with its ACL entries
    pub async fn insert_document(&self, document: &Document) -> Result<()> {
        let document = document.clone();

        self.db
            .transaction_async(move |tx| {
                tx.execute(
                    r#"
                    INSERT INTO document (id, user_id, title, description, language, create_date)
                    VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
                    "#,
                    params![
                        document.id,
                        document.owner_id,
                        document.title,
                        document.description,
                        document.language,
                    ],
                )?;

                for entry in &document.acl {
                    tx.execute(
                        "INSERT INTO acl (source_id, target_id, perm) VALUES (?1, ?2, ?3)",
                        params![document.id, entry.target_id, entry.permission.to_string()],
                    )?;
                }

                Ok(())
            })
            .await
    }

    /// Attach a file to a document; lower positions come first
    pub async fn insert_file(&self, file: &StoredFile, position: i64) -> Result<()> {
        let file = file.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO file (id, document_id, name, path, mime_type, position, create_date)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
                    "#,
                    params![
                        file.id,
                        file.document_id,
                        file.name,
                        file.path.to_string_lossy(),
                        file.mime_type,
                        position,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Soft-delete a document; it then reads as absent
    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        let document_id = document_id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE document SET delete_date = datetime('now') WHERE id = ?1",
                    [&document_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Soft-delete a file; the next live file becomes the main file
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let file_id = file_id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE file SET delete_date = datetime('now') WHERE id = ?1",
                    [&file_id],
                )?;
                Ok(())
            })
            .await
    }

    fn get_document_sync(conn: &Connection, document_id: &str) -> Result<Option<Document>> {
        let document = conn
            .query_row(
                r#"
                SELECT id, user_id, title, description, language
                FROM document WHERE id = ?1 AND delete_date IS NULL
                "#,
                [document_id],
                |row| {
                    Ok(Document {
                        id: row.get(0)?,
                        owner_id: row.get(1)?,
                        title: row.get(2)?,
                        description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        language: row.get(4)?,
                        acl: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut document) = document else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT target_id, perm FROM acl WHERE source_id = ?1 AND delete_date IS NULL ORDER BY id",
        )?;
        let rows = stmt
            .query_map([document_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for (target_id, perm) in rows {
            document.acl.push(AclEntry::new(target_id, perm.parse()?));
        }

        Ok(Some(document))
    }

    fn get_main_file_sync(conn: &Connection, document_id: &str) -> Result<Option<StoredFile>> {
        let file = conn
            .query_row(
                r#"
                SELECT id, document_id, name, path, mime_type
                FROM file
                WHERE document_id = ?1 AND delete_date IS NULL
                ORDER BY position ASC, create_date ASC
                LIMIT 1
                "#,
                [document_id],
                |row| {
                    Ok(StoredFile {
                        id: row.get(0)?,
                        document_id: row.get(1)?,
                        name: row.get(2)?,
                        path: PathBuf::from(row.get::<_, String>(3)?),
                        mime_type: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(file)
    }

    // =========================================================================
    // Identity Operations
    // =========================================================================

    /// Add a user to a group
    pub async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let group_id = group_id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO user_group (user_id, group_id) VALUES (?1, ?2)",
                    params![user_id, group_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Register an authentication token for a user
    pub async fn create_auth_token(&self, token: &str, user_id: &str) -> Result<()> {
        let token = token.to_string();
        let user_id = user_id.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO auth_token (id, user_id, create_date) VALUES (?1, ?2, datetime('now'))",
                    params![token, user_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Load a requester with all of its groups
    pub async fn get_requester(&self, user_id: &str) -> Result<Requester> {
        let user_id = user_id.to_string();
        self.db
            .execute_async(move |conn| Self::get_requester_sync(conn, &user_id))
            .await
    }

    fn get_requester_sync(conn: &Connection, user_id: &str) -> Result<Requester> {
        let mut stmt =
            conn.prepare("SELECT group_id FROM user_group WHERE user_id = ?1 ORDER BY group_id")?;
        let groups = stmt
            .query_map([user_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Requester::new(user_id).with_groups(groups))
    }
}

#[async_trait]
impl DocumentStore for Repository {
    async fn get_document(&self, document_id: &str) -> Result<Option<Document>> {
        let document_id = document_id.to_string();

        self.db
            .execute_async(move |conn| Self::get_document_sync(conn, &document_id))
            .await
    }

    async fn get_main_file(&self, document_id: &str) -> Result<Option<StoredFile>> {
        let document_id = document_id.to_string();

        self.db
            .execute_async(move |conn| Self::get_main_file_sync(conn, &document_id))
            .await
    }
}

#[async_trait]
impl SessionStore for Repository {
    async fn resolve_token(&self, token: &str) -> Result<Option<Requester>> {
        let token = token.to_string();

        self.db
            .execute_async(move |conn| {
                let user_id: Option<String> = conn
                    .query_row(
                        "SELECT user_id FROM auth_token WHERE id = ?1",
                        [&token],
                        |row| row.get(0),
                    )
                    .optional()?;

                match user_id {
                    Some(user_id) => Ok(Some(Self::get_requester_sync(conn, &user_id)?)),
                    None => {
                        debug!("Unknown authentication token");
                        Ok(None)
                    }
                }
            })
            .await
    }
}
