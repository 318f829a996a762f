//! Core domain logic for the Libro book catalog.
//! This crate owns the validation contract every catalog write goes through.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{CatalogConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{is_valid_isbn, Book, BookValidationError};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use seed::{sample_catalog, seed_catalog, seed_if_empty};
pub use service::book_manager::{BookManager, ErrorKind, ManagerError, ManagerResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
