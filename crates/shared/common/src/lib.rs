//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Error handling with an explicit error-kind to HTTP status mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
