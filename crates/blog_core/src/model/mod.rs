//! Blog record model: authors, posts and their field validators.
//!
//! # Responsibility
//! - Define the canonical records persisted by the store.
//! - Own every field-level validation rule as a stateless function.
//!
//! # Invariants
//! - A record value never holds a field that failed its validator.
//! - Setters validate before assignment; a rejected value leaves the record
//!   unchanged.

pub mod author;
pub mod post;
pub mod validation;
