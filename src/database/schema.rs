/*!
 * Database schema definitions and migrations.
 *
 * The tables follow the host document application's layout for the subset
 * translation reads: documents, their files, ACL grants, group membership
 * and authentication tokens.
 */

use anyhow::{Context, Result};
use rusqlite::Connection;
use log::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Foreign keys are a per-connection setting
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS document (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            language TEXT,
            create_date TEXT NOT NULL,
            delete_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_document_user ON document(user_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS file (
            id TEXT PRIMARY KEY,
            document_id TEXT NOT NULL REFERENCES document(id) ON DELETE CASCADE,
            name TEXT,
            path TEXT NOT NULL,
            mime_type TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            create_date TEXT NOT NULL,
            delete_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_file_document ON file(document_id, position);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS acl (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_id TEXT NOT NULL,
            target_id TEXT NOT NULL,
            perm TEXT NOT NULL CHECK (perm IN ('READ', 'WRITE')),
            delete_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_acl_source ON acl(source_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_group (
            user_id TEXT NOT NULL,
            group_id TEXT NOT NULL,
            PRIMARY KEY (user_id, group_id)
        );

        CREATE TABLE IF NOT EXISTS auth_token (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            create_date TEXT NOT NULL
        );
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Migrate the schema from an older version.
///
/// v1 is the first schema, so any older non-zero version is foreign.
fn migrate_schema(_conn: &Connection, from_version: i32) -> Result<()> {
    Err(anyhow::anyhow!(
        "Unknown schema version: {}. Cannot migrate.",
        from_version
    ))
}
