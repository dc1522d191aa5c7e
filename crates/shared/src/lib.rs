//! Shared types, errors, and configuration for Tillbook.
//!
//! This crate provides common pieces used across all other crates:
//! - Money helpers with decimal precision
//! - The well-known wallet identifier
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DeleteRefundPolicy};
pub use error::{AppError, AppResult};
pub use types::WALLET_BALANCE_ID;
