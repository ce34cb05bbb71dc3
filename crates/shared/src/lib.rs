//! Shared types, errors, and configuration for Splitpot.
//!
//! This crate provides common types used across all other crates:
//! - Currency and money types with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::AppConfig;
pub use error::{AppError, AppResult};
