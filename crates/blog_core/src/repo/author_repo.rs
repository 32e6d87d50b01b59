//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Author names are unique; collisions surface as `RepoError::DuplicateName`.
//! - `created_at` is written by storage on insert only.
//! - Every update stamps `updated_at` with the current time.

use crate::model::author::{Author, AuthorId};
use crate::repo::{
    ensure_connection_ready, is_unique_violation, RepoError, RepoResult, NOW_MS_SQL,
};
use rusqlite::{params, Connection, Row, ToSql};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

const ENTITY: &str = "author";

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// Inserts an unsaved author and returns the stored record.
    fn create_author(&self, author: &Author) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn get_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    /// Lists all authors ordered by id.
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
    fn count_authors(&self) -> RepoResult<u64>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "authors")?;
        Ok(Self { conn })
    }

    fn query_one<P: ToSql>(&self, filter: &str, param: P) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE {filter};"))?;
        let mut rows = stmt.query([param])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_author_row(row)?)),
            None => Ok(None),
        }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<Author> {
        if let Some(id) = author.id() {
            return Err(RepoError::AlreadyPersisted { entity: ENTITY, id });
        }
        author.validate()?;

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name(), author.phone_number()],
            )
            .map_err(|err| map_write_error(err, author.name()))?;

        let id = self.conn.last_insert_rowid();
        self.get_author(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("author {id} missing right after insert"))
        })
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.query_one("id = ?1", id)
    }

    fn get_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.query_one("name = ?1", name)
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        let id = author.id().ok_or(RepoError::NotPersisted(ENTITY))?;
        author.validate()?;

        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE authors
                     SET
                        name = ?1,
                        phone_number = ?2,
                        updated_at = {NOW_MS_SQL}
                     WHERE id = ?3;"
                ),
                params![author.name(), author.phone_number(), id],
            )
            .map_err(|err| map_write_error(err, author.name()))?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn count_authors(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative count {count}")))
    }
}

fn map_write_error(err: rusqlite::Error, name: &str) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::DuplicateName(name.to_owned())
    } else {
        err.into()
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    Author::restore(
        id,
        row.get("name")?,
        row.get("phone_number")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("authors.id={id}: {err}")))
}
