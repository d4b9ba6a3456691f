//! # crewvar-common
//!
//! Shared utilities: configuration loading, application error type, and
//! tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, Environment};
pub use error::{AppError, AppResult, ErrorResponse};
