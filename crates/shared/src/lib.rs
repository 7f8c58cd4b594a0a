//! Shared types, errors, and configuration for Mondera.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Pagination types for list endpoints
//! - Requested-language handling for localized reads
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{Language, PageMeta, PageRequest, PageResponse};
