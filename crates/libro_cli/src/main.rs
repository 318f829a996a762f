//! Console host for the Libro catalog.
//!
//! # Responsibility
//! - Resolve configuration, open the catalog and hand control to the menu.
//! - Report startup failures on stderr with a non-zero exit code.

mod menu;

use libro_core::db::{open_db, open_db_in_memory};
use libro_core::{init_logging, seed_if_empty, BookManager, CatalogConfig, SqliteBookRepository};
use log::info;
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("libro: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CatalogConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn)?);

    if config.seed_on_empty {
        seed_if_empty(&manager)?;
    }

    info!("event=cli_start module=cli status=ok version={}", libro_core::core_version());
    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(&manager, stdin.lock(), stdout.lock())?;
    Ok(())
}
