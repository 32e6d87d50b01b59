//! Core records and persistence for the blog store.
//! Every author/post invariant is enforced in this crate.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::BlogConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{validate_name, validate_phone_number, Author, AuthorId};
pub use model::post::{
    validate_category, validate_content, validate_summary, validate_title, Category, Post, PostId,
};
pub use model::validation::ValidationError;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::{NewPost, PostService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
