//! Catalog domain model.
//!
//! # Responsibility
//! - Define the records core business logic operates on.
//! - Keep validation rules next to the data they constrain.
//!
//! # Invariants
//! - Every book is identified by its 13-digit ISBN.

pub mod book;
