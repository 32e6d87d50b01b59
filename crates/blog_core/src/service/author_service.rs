//! Author use-case service.
//!
//! # Responsibility
//! - Register authors from raw input.
//! - Apply single-field edits (rename, phone change) through validated
//!   setters.

use crate::model::author::{Author, AuthorId};
use crate::model::validation::ValidationError;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::log_rejection;
use log::info;

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new author.
    ///
    /// # Errors
    /// - `RepoError::Validation` when `name` or `phone_number` is rejected.
    /// - `RepoError::DuplicateName` when another author already uses `name`.
    pub fn register_author(
        &self,
        name: impl Into<String>,
        phone_number: Option<&str>,
    ) -> RepoResult<Author> {
        let created = Author::new(name, phone_number)
            .map_err(RepoError::from)
            .and_then(|author| self.repo.create_author(&author))
            .map_err(|err| log_rejection("author_create", err))?;

        info!(
            "event=author_create module=service status=ok id={}",
            created.id().unwrap_or_default()
        );
        Ok(created)
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.get_author_by_name(name)
    }

    pub fn list_authors(&self) -> RepoResult<Vec<Author>> {
        self.repo.list_authors()
    }

    /// Replaces an author's name and returns the updated record.
    pub fn rename_author(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let name = name.into();
        self.edit(id, "author_rename", |author| author.set_name(name))
    }

    /// Replaces (or clears, with `None`) an author's phone number.
    pub fn change_phone_number(
        &self,
        id: AuthorId,
        phone_number: Option<&str>,
    ) -> RepoResult<Author> {
        self.edit(id, "author_phone_change", |author| {
            author.set_phone_number(phone_number)
        })
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo
            .delete_author(id)
            .map_err(|err| log_rejection("author_delete", err))?;
        info!("event=author_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn count_authors(&self) -> RepoResult<u64> {
        self.repo.count_authors()
    }

    fn edit(
        &self,
        id: AuthorId,
        event: &'static str,
        apply: impl FnOnce(&mut Author) -> Result<(), ValidationError>,
    ) -> RepoResult<Author> {
        let updated = self
            .apply_and_store(id, apply)
            .map_err(|err| log_rejection(event, err))?;
        info!("event={event} module=service status=ok id={id}");
        Ok(updated)
    }

    fn apply_and_store(
        &self,
        id: AuthorId,
        apply: impl FnOnce(&mut Author) -> Result<(), ValidationError>,
    ) -> RepoResult<Author> {
        let not_found = || RepoError::NotFound { entity: "author", id };
        let mut author = self.repo.get_author(id)?.ok_or_else(not_found)?;
        apply(&mut author)?;
        self.repo.update_author(&author)?;
        self.repo.get_author(id)?.ok_or_else(not_found)
    }
}
