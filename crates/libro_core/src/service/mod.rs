//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing catalog operations.
//! - Keep console and other hosts decoupled from storage details.

pub mod book_manager;
