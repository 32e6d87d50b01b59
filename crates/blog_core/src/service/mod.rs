//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw caller input into validated records and persist them.
//! - Keep web/CLI layers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Log events carry metadata only (ids, field names), never field values.

pub mod author_service;
pub mod post_service;

use crate::repo::RepoError;
use log::warn;

/// Logs a rejected write and hands the error back unchanged.
pub(crate) fn log_rejection(event: &'static str, err: RepoError) -> RepoError {
    match &err {
        RepoError::Validation(validation) => warn!(
            "event={event} module=service status=rejected error_code=validation field={}",
            validation.field()
        ),
        RepoError::DuplicateName(_) => {
            warn!("event={event} module=service status=rejected error_code=duplicate_name")
        }
        RepoError::NotFound { entity, id } => warn!(
            "event={event} module=service status=rejected error_code=not_found entity={entity} id={id}"
        ),
        other => warn!("event={event} module=service status=error error={other}"),
    }
    err
}
