/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for all content tables
 * and handles schema migrations for version upgrades.
 *
 * The tables form a strict tree rooted at exams:
 * exams -> components -> question_banks -> bank_pages -> {questions, materials};
 * questions -> {question_options, answers, materials}. Every foreign key
 * cascades on delete, so removing a record removes its whole subtree.
 */

use log::{debug, info};
use rusqlite::Connection;

use crate::errors::{StoreError, StoreResult};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> StoreResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - create all tables
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StoreError::SchemaVersion(current_version));
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> StoreResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

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
fn set_schema_version(conn: &Connection, version: i32) -> StoreResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all content tables
fn create_all_tables(conn: &Connection) -> StoreResult<()> {
    // Create schema version table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // Create exams table, root of the hierarchy
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS exams (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            language TEXT NOT NULL,
            metadata TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )?;

    // Create components table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS components (
            id TEXT PRIMARY KEY,
            exam_id TEXT NOT NULL REFERENCES exams(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            total_questions INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_components_exam ON components(exam_id);
        "#,
    )?;

    // Create question_banks table; bank codes are unique store-wide
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS question_banks (
            id TEXT PRIMARY KEY,
            component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
            code TEXT NOT NULL UNIQUE,
            total_questions INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_question_banks_component ON question_banks(component_id);
        "#,
    )?;

    // Create bank_pages table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS bank_pages (
            id TEXT PRIMARY KEY,
            question_bank_id TEXT NOT NULL REFERENCES question_banks(id) ON DELETE CASCADE,
            page_index INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bank_pages_bank ON bank_pages(question_bank_id);
        "#,
    )?;

    // Create questions table (before materials, which reference it)
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id TEXT PRIMARY KEY,
            bank_page_id TEXT NOT NULL REFERENCES bank_pages(id) ON DELETE CASCADE,
            question_type TEXT NOT NULL,
            question_text TEXT NOT NULL,
            display_order INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_questions_page ON questions(bank_page_id);
        "#,
    )?;

    // Create materials table; both parents are optional, each cascades
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS materials (
            id TEXT PRIMARY KEY,
            bank_page_id TEXT REFERENCES bank_pages(id) ON DELETE CASCADE,
            question_id TEXT REFERENCES questions(id) ON DELETE CASCADE,
            material_type TEXT NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            metadata TEXT,
            display_order INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_materials_page ON materials(bank_page_id);
        CREATE INDEX IF NOT EXISTS idx_materials_question ON materials(question_id);
        "#,
    )?;

    // Create question_options table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS question_options (
            id TEXT PRIMARY KEY,
            question_id TEXT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
            option_label TEXT,
            option_value TEXT NOT NULL,
            match_target TEXT,
            metadata TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_question_options_question ON question_options(question_id);
        "#,
    )?;

    // Create answers table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS answers (
            id TEXT PRIMARY KEY,
            question_id TEXT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
            answer_type TEXT NOT NULL,
            correct_answer TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Migrate the schema from one version to another
fn migrate_schema(conn: &Connection, from_version: i32) -> StoreResult<()> {
    let current = from_version;

    while current < SCHEMA_VERSION {
        match current {
            // Add migration steps here as the schema evolves
            _ => {
                return Err(StoreError::SchemaVersion(current));
            }
        }
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!("Schema migration completed to v{}", SCHEMA_VERSION);
    Ok(())
}

/// Drop all tables (for testing purposes only)
#[cfg(test)]
pub fn drop_all_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS answers;
        DROP TABLE IF EXISTS question_options;
        DROP TABLE IF EXISTS materials;
        DROP TABLE IF EXISTS questions;
        DROP TABLE IF EXISTS bank_pages;
        DROP TABLE IF EXISTS question_banks;
        DROP TABLE IF EXISTS components;
        DROP TABLE IF EXISTS exams;
        DROP TABLE IF EXISTS schema_version;
        "#,
    )?;
    Ok(())
}
