//! Environment-driven runtime configuration.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `BLOG_DB_PATH` | SQLite file path | in-memory database |
//! | `BLOG_LOG_LEVEL` | `trace\|debug\|info\|warn\|error` | [`default_log_level`] |
//! | `BLOG_LOG_DIR` | absolute directory for rolling logs | logging disabled |

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::env;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "BLOG_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "BLOG_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "BLOG_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl BlogConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_dir = get(LOG_DIR_VAR)
            .map(|dir| normalize_log_dir(&dir).map_err(|err| format!("{LOG_DIR_VAR}: {err}")))
            .transpose()?;
        let log_level = match get(LOG_LEVEL_VAR) {
            Some(level) => {
                normalize_level(&level).map_err(|err| format!("{LOG_LEVEL_VAR}: {err}"))?
            }
            None => default_log_level(),
        };

        Ok(Self {
            db_path: get(DB_PATH_VAR).map(PathBuf::from),
            log_level: log_level.to_string(),
            log_dir,
        })
    }
}
