/*!
 * Error types for the exam content store.
 *
 * This module contains the error taxonomy surfaced by the store,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Result alias used throughout the store
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the exam content store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested identifier does not resolve to a record
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "exam" or "question_bank"
        entity: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// A write was rejected by a schema constraint: duplicate identifier,
    /// duplicate bank code, dangling foreign key or missing required field
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other error coming out of SQLite
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// A structured field could not be encoded to or decoded from JSON
    #[error("invalid structured payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from a filesystem operation (database directory creation)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unresolvable store configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The on-disk schema version is newer than this build understands
    #[error("unsupported schema version: {0}")]
    SchemaVersion(i32),

    /// The connection mutex was poisoned by a panicking writer
    #[error("database lock poisoned")]
    LockPoisoned,

    /// A blocking database task panicked before completing
    #[error("database task panicked: {0}")]
    TaskJoin(String),
}

impl StoreError {
    /// Build a NotFound error for the given entity kind and identifier
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error is the NotFound variant
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is the ConstraintViolation variant
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(e, msg) = &err {
            if e.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::ConstraintViolation(msg.clone().unwrap_or_else(|| e.to_string()));
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notFound_display_shouldIncludeEntityAndId() {
        let err = StoreError::not_found("exam", "missing-id");
        assert_eq!(err.to_string(), "exam not found: missing-id");
        assert!(err.is_not_found());
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn test_fromRusqlite_withConstraintFailure_shouldMapToConstraintViolation() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id TEXT PRIMARY KEY);")
            .unwrap();
        conn.execute("INSERT INTO t (id) VALUES ('a')", []).unwrap();

        let dup = conn
            .execute("INSERT INTO t (id) VALUES ('a')", [])
            .unwrap_err();
        let err = StoreError::from(dup);
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_fromRusqlite_withNonConstraintFailure_shouldMapToDatabase() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let bad = conn.execute("SELECT * FROM no_such_table", []).unwrap_err();
        let err = StoreError::from(bad);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
