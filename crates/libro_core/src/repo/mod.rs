//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract the manager depends on.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Book::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`) in
//!   addition to DB transport errors.

pub mod book_repo;
