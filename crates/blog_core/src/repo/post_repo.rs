//! Post repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Post::validate()` before SQL mutations.
//! - `category` is stored as its display text (`Fiction` / `Non-Fiction`).

use crate::model::post::{validate_category, Category, Post, PostId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    summary,
    category,
    created_at,
    updated_at
FROM posts";

const ENTITY: &str = "post";

/// Filter options for listing posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub category: Option<Category>,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    /// Inserts an unsaved post and returns the stored record.
    fn create_post(&self, post: &Post) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// Lists posts ordered by id, optionally restricted to one category.
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    fn update_post(&self, post: &Post) -> RepoResult<()>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
    fn count_posts(&self) -> RepoResult<u64>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "posts")?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &Post) -> RepoResult<Post> {
        if let Some(id) = post.id() {
            return Err(RepoError::AlreadyPersisted { entity: ENTITY, id });
        }
        post.validate()?;

        self.conn.execute(
            "INSERT INTO posts (title, content, summary, category)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title(),
                post.content(),
                post.summary(),
                post.category().as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_post(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("post {id} missing right after insert")))
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn update_post(&self, post: &Post) -> RepoResult<()> {
        let id = post.id().ok_or(RepoError::NotPersisted(ENTITY))?;
        post.validate()?;

        let changed = self.conn.execute(
            &format!(
                "UPDATE posts
                 SET
                    title = ?1,
                    content = ?2,
                    summary = ?3,
                    category = ?4,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?5;"
            ),
            params![
                post.title(),
                post.content(),
                post.summary(),
                post.category().as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn count_posts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative count {count}")))
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let category_text: String = row.get("category")?;
    let category = validate_category(Some(category_text.as_str())).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in posts.category (id={id})"
        ))
    })?;

    Post::restore(
        id,
        row.get("title")?,
        row.get("content")?,
        row.get("summary")?,
        category,
        row.get("created_at")?,
        row.get("updated_at")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("posts.id={id}: {err}")))
}
