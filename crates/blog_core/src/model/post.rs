//! Post record and its field validators.
//!
//! # Responsibility
//! - Define the post shape persisted in `posts`.
//! - Validate `title`, `content`, `summary` and `category` on every
//!   assignment.
//!
//! # Invariants
//! - `title` contains one of [`TITLE_KEYWORDS`] as a whole word.
//! - Non-empty `content` is at least [`CONTENT_MIN_CHARS`] characters.
//! - Non-empty `summary` is at most [`SUMMARY_MAX_CHARS`] characters.
//! - `category` is always one of the [`Category`] variants.

use crate::model::validation::{char_len, is_blank, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned post identifier.
pub type PostId = i64;

pub const TITLE_KEYWORDS: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];
pub const CONTENT_MIN_CHARS: usize = 250;
pub const SUMMARY_MAX_CHARS: usize = 250;

static TITLE_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives = TITLE_KEYWORDS
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({alternatives})\b")).expect("valid title keyword regex")
});

/// Post category.
///
/// Stored and serialized as `Fiction` / `Non-Fiction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Fiction, Category::NonFiction];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_category(Some(s))
    }
}

/// Validates a post title against the clickbait keyword list.
///
/// Matching is case-sensitive and word-bounded: `"Topical"` does not count as
/// `"Top"`.
///
/// # Errors
/// - Returns `ValidationError` when `value` is absent or has no keyword.
pub fn validate_title(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(title) if TITLE_KEYWORD_RE.is_match(title) => Ok(title),
        _ => Err(ValidationError::new(
            "title",
            "Title must contain clickbait keywords.",
        )),
    }
}

/// Validates optional post content.
///
/// # Errors
/// - Returns `ValidationError` when non-empty content is shorter than
///   [`CONTENT_MIN_CHARS`].
pub fn validate_content(value: Option<&str>) -> Result<Option<&str>, ValidationError> {
    if is_blank(value) {
        return Ok(value);
    }
    match value {
        Some(content) if char_len(content) < CONTENT_MIN_CHARS => Err(ValidationError::new(
            "content",
            format!("Post content must be at least {CONTENT_MIN_CHARS} characters long."),
        )),
        _ => Ok(value),
    }
}

/// Validates an optional post summary.
///
/// # Errors
/// - Returns `ValidationError` when the summary exceeds [`SUMMARY_MAX_CHARS`].
pub fn validate_summary(value: Option<&str>) -> Result<Option<&str>, ValidationError> {
    if is_blank(value) {
        return Ok(value);
    }
    match value {
        Some(summary) if char_len(summary) > SUMMARY_MAX_CHARS => Err(ValidationError::new(
            "summary",
            format!("Post summary can have a maximum of {SUMMARY_MAX_CHARS} characters."),
        )),
        _ => Ok(value),
    }
}

/// Parses a category, rejecting anything but the two exact names.
///
/// Unlike the optional text fields, absent and empty values are rejected.
pub fn validate_category(value: Option<&str>) -> Result<Category, ValidationError> {
    Category::ALL
        .into_iter()
        .find(|category| Some(category.as_str()) == value)
        .ok_or_else(|| {
            let allowed = Category::ALL
                .iter()
                .map(|category| category.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            ValidationError::new("category", format!("Post category must be one of {allowed}."))
        })
}

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostFields")]
pub struct Post {
    id: Option<PostId>,
    title: String,
    content: Option<String>,
    summary: Option<String>,
    category: Category,
    /// Unix epoch milliseconds, assigned on insert.
    created_at: Option<i64>,
    /// Unix epoch milliseconds, `None` until the first update.
    updated_at: Option<i64>,
}

impl Post {
    /// Creates an unsaved post with no content or summary.
    pub fn new(title: impl Into<String>, category: Category) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(Some(title.as_str()))?;

        Ok(Self {
            id: None,
            title,
            content: None,
            summary: None,
            category,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content: String = content.into();
        self.set_content(Some(content.as_str()))?;
        Ok(self)
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Result<Self, ValidationError> {
        let summary: String = summary.into();
        self.set_summary(Some(summary.as_str()))?;
        Ok(self)
    }

    /// Rebuilds a persisted post, re-checking stored values.
    pub(crate) fn restore(
        id: PostId,
        title: String,
        content: Option<String>,
        summary: Option<String>,
        category: Category,
        created_at: i64,
        updated_at: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let post = Self {
            id: Some(id),
            title,
            content,
            summary,
            category,
            created_at: Some(created_at),
            updated_at,
        };
        post.validate()?;
        Ok(post)
    }

    /// Re-runs every field validator against current values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(Some(self.title.as_str()))?;
        validate_content(self.content.as_deref())?;
        validate_summary(self.summary.as_deref())?;
        Ok(())
    }

    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(Some(title.as_str()))?;
        self.title = title;
        Ok(())
    }

    pub fn set_content(&mut self, content: Option<&str>) -> Result<(), ValidationError> {
        self.content = validate_content(content)?.map(str::to_owned);
        Ok(())
    }

    pub fn set_summary(&mut self, summary: Option<&str>) -> Result<(), ValidationError> {
        self.summary = validate_summary(summary)?.map(str::to_owned);
        Ok(())
    }

    /// Infallible: a `Category` value is valid by construction. Parse raw
    /// input with `str::parse::<Category>()` or [`validate_category`].
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, content={}, summary={})",
            display_opt(self.id.map(|id| id.to_string()).as_deref()),
            self.title,
            display_opt(self.content.as_deref()),
            display_opt(self.summary.as_deref()),
        )
    }
}

fn display_opt(value: Option<&str>) -> &str {
    value.unwrap_or("None")
}

#[derive(Deserialize)]
struct PostFields {
    #[serde(default)]
    id: Option<PostId>,
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<PostFields> for Post {
    type Error = ValidationError;

    fn try_from(value: PostFields) -> Result<Self, Self::Error> {
        let title = validate_title(value.title.as_deref())?.to_owned();
        validate_content(value.content.as_deref())?;
        validate_summary(value.summary.as_deref())?;
        let category = validate_category(value.category.as_deref())?;

        Ok(Self {
            id: value.id,
            title,
            content: value.content,
            summary: value.summary,
            category,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}
