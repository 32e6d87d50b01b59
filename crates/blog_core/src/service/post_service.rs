//! Post use-case service.
//!
//! # Responsibility
//! - Build validated posts from raw request input.
//! - Route edits through setters so each changed field is re-validated.

use crate::model::post::{validate_category, Post, PostId};
use crate::model::validation::ValidationError;
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::log_rejection;
use log::info;

/// Raw post input as received from an outer (web) layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub summary: Option<String>,
    /// Must be `Fiction` or `Non-Fiction`; anything else is rejected.
    pub category: Option<String>,
}

impl NewPost {
    /// Runs every post validator and builds an unsaved record.
    pub fn into_post(self) -> Result<Post, ValidationError> {
        let category = validate_category(self.category.as_deref())?;
        let mut post = Post::new(self.title, category)?;
        post.set_content(self.content.as_deref())?;
        post.set_summary(self.summary.as_deref())?;
        Ok(post)
    }
}

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new post.
    pub fn publish_post(&self, request: NewPost) -> RepoResult<Post> {
        let created = request
            .into_post()
            .map_err(RepoError::from)
            .and_then(|post| self.repo.create_post(&post))
            .map_err(|err| log_rejection("post_create", err))?;

        info!(
            "event=post_create module=service status=ok id={} category={}",
            created.id().unwrap_or_default(),
            created.category()
        );
        Ok(created)
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    /// Replaces a post's title and returns the updated record.
    pub fn retitle_post(&self, id: PostId, title: impl Into<String>) -> RepoResult<Post> {
        let title = title.into();
        let updated = self
            .load(id)
            .and_then(|mut post| {
                post.set_title(title)?;
                self.store(&post)
            })
            .map_err(|err| log_rejection("post_retitle", err))?;

        info!("event=post_retitle module=service status=ok id={id}");
        Ok(updated)
    }

    /// Persists an edited post and returns the stored record.
    ///
    /// # Errors
    /// - `RepoError::NotPersisted` when `post` was never created.
    pub fn update_post(&self, post: &Post) -> RepoResult<Post> {
        let updated = self
            .store(post)
            .map_err(|err| log_rejection("post_update", err))?;

        info!(
            "event=post_update module=service status=ok id={}",
            updated.id().unwrap_or_default()
        );
        Ok(updated)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo
            .delete_post(id)
            .map_err(|err| log_rejection("post_delete", err))?;
        info!("event=post_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn count_posts(&self) -> RepoResult<u64> {
        self.repo.count_posts()
    }

    fn load(&self, id: PostId) -> RepoResult<Post> {
        self.repo
            .get_post(id)?
            .ok_or(RepoError::NotFound { entity: "post", id })
    }

    fn store(&self, post: &Post) -> RepoResult<Post> {
        self.repo.update_post(post)?;
        let id = post.id().ok_or(RepoError::NotPersisted("post"))?;
        self.load(id)
    }
}
