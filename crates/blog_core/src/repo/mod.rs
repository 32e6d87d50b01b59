//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-record data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes re-run every field validator before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Repositories only accept fully migrated connections.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod post_repo;

/// SQL expression producing the current time in epoch milliseconds.
pub(crate) const NOW_MS_SQL: &str = "(CAST(strftime('%s', 'now') AS INTEGER) * 1000)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for author/post persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    /// Update/delete was called on a record that has no storage id yet.
    NotPersisted(&'static str),
    /// Insert was called on a record that already has a storage id.
    AlreadyPersisted {
        entity: &'static str,
        id: i64,
    },
    DuplicateName(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::NotPersisted(entity) => write!(f, "{entity} has not been persisted yet"),
            Self::AlreadyPersisted { entity, id } => {
                write!(f, "{entity} is already persisted with id {id}")
            }
            Self::DuplicateName(name) => write!(f, "author name already taken: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies that `conn` is migrated and carries `table`.
pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}

/// Returns true when `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(inner, _) => {
            inner.code == ErrorCode::ConstraintViolation
                && inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
