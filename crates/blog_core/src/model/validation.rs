//! Field validation error shared by all record types.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised by a field validator.
///
/// Carries the offending field name and a human-readable message that callers
/// can surface unchanged (e.g. as a 4xx response body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Name of the field whose value was rejected.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Error for ValidationError {}

/// Treats `None` and `""` alike for optional fields.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::{char_len, is_blank, ValidationError};

    #[test]
    fn display_prefixes_field_name() {
        let err = ValidationError::new("name", "Author must have a name.");
        assert_eq!(err.to_string(), "name: Author must have a name.");
        assert_eq!(err.field(), "name");
        assert_eq!(err.message(), "Author must have a name.");
    }

    #[test]
    fn blank_covers_absent_and_empty() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(!is_blank(Some(" ")));
    }

    #[test]
    fn char_len_counts_scalar_values() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("čšž"), 3);
    }
}
