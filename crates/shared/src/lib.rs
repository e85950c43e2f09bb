//! Shared types and errors for Firmsight.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Page windows for offset-paged source queries
//! - Application-wide error types

pub mod error;
pub mod types;

pub use error::{AppError, AppResult};
