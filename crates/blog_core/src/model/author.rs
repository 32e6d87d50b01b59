//! Author record and its field validators.
//!
//! # Responsibility
//! - Define the author identity persisted in `authors`.
//! - Validate `name` and `phone_number` on every assignment.
//!
//! # Invariants
//! - `name` is never empty.
//! - `phone_number`, when non-empty, is exactly 10 characters long.
//! - `id` and `created_at` are assigned by storage and never change afterwards.

use crate::model::validation::{char_len, is_blank, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned author identifier.
pub type AuthorId = i64;

pub const PHONE_NUMBER_LEN: usize = 10;

/// Validates an author name.
///
/// # Errors
/// - Returns `ValidationError` when `value` is absent or empty.
pub fn validate_name(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ValidationError::new("name", "Author must have a name.")),
    }
}

/// Validates an optional phone number.
///
/// Only the length is checked; any 10-character string is accepted even
/// though the message speaks about digits.
///
/// # Errors
/// - Returns `ValidationError` when a non-empty value is not 10 characters.
pub fn validate_phone_number(value: Option<&str>) -> Result<Option<&str>, ValidationError> {
    if is_blank(value) {
        return Ok(value);
    }
    match value {
        Some(phone) if char_len(phone) == PHONE_NUMBER_LEN => Ok(value),
        _ => Err(ValidationError::new(
            "phone_number",
            "Phone number must be exactly ten digits.",
        )),
    }
}

/// Blog author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorFields")]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
    phone_number: Option<String>,
    /// Unix epoch milliseconds, assigned on insert.
    created_at: Option<i64>,
    /// Unix epoch milliseconds, `None` until the first update.
    updated_at: Option<i64>,
}

impl Author {
    /// Creates an unsaved author after validating every field.
    pub fn new(name: impl Into<String>, phone_number: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(Some(name.as_str()))?;
        let phone_number = validate_phone_number(phone_number)?.map(str::to_owned);

        Ok(Self {
            id: None,
            name,
            phone_number,
            created_at: None,
            updated_at: None,
        })
    }

    /// Rebuilds a persisted author, re-checking stored values.
    pub(crate) fn restore(
        id: AuthorId,
        name: String,
        phone_number: Option<String>,
        created_at: i64,
        updated_at: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let author = Self {
            id: Some(id),
            name,
            phone_number,
            created_at: Some(created_at),
            updated_at,
        };
        author.validate()?;
        Ok(author)
    }

    /// Re-runs every field validator against current values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(Some(self.name.as_str()))?;
        validate_phone_number(self.phone_number.as_deref())?;
        Ok(())
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// Whether storage has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces the name. The record is unchanged on rejection.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(Some(name.as_str()))?;
        self.name = name;
        Ok(())
    }

    /// Replaces the phone number. The record is unchanged on rejection.
    pub fn set_phone_number(&mut self, phone_number: Option<&str>) -> Result<(), ValidationError> {
        self.phone_number = validate_phone_number(phone_number)?.map(str::to_owned);
        Ok(())
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Author(id={id}, name={})", self.name),
            None => write!(f, "Author(id=None, name={})", self.name),
        }
    }
}

#[derive(Deserialize)]
struct AuthorFields {
    #[serde(default)]
    id: Option<AuthorId>,
    name: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<AuthorFields> for Author {
    type Error = ValidationError;

    fn try_from(value: AuthorFields) -> Result<Self, Self::Error> {
        let name = validate_name(value.name.as_deref())?.to_owned();
        validate_phone_number(value.phone_number.as_deref())?;
        Ok(Self {
            id: value.id,
            name,
            phone_number: value.phone_number,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}
