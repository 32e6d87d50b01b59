//! CLI smoke entry point.
//!
//! Opens the configured store (see `blog_core::config`) and prints its
//! version, schema version and record counts.

use blog_core::db::migrations::current_version;
use blog_core::db::{open_db, open_db_in_memory};
use blog_core::{
    core_version, init_logging, AuthorService, BlogConfig, PostService, SqliteAuthorRepository,
    SqlitePostRepository,
};
use log::error;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("blog_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = BlogConfig::from_env()?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let authors = AuthorService::new(SqliteAuthorRepository::try_new(&conn)?);
    let posts = PostService::new(SqlitePostRepository::try_new(&conn)?);

    println!("blog_core version={}", core_version());
    println!("schema_version={}", current_version(&conn)?);
    println!(
        "store={}",
        config
            .db_path
            .as_deref()
            .map_or_else(|| ":memory:".into(), |path| path.display().to_string())
    );
    println!("authors={}", authors.count_authors()?);
    println!("posts={}", posts.count_posts()?);

    Ok(())
}
