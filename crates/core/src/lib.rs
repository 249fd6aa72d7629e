//! Core utilities for the Event Manager client tools
//!
//! This crate provides shared functionality used by the API client and the CLI:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Retry**: Exponential backoff and a circuit breaker for flaky network calls
//! - **Validation**: Fluent validators for user input (emails, passwords, dates)
//! - **Configuration**: TOML-based configuration with environment overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use eventmanager_core::config::Config;
//! use eventmanager_core::validation::Validator;
//!
//! let config = Config::load(None).expect("config");
//! println!("Server: {}", config.schema.server.base_url());
//!
//! let result = Validator::new()
//!     .required("email", "student@example.com")
//!     .email("email", "student@example.com")
//!     .validate();
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;
pub mod validation;

pub use error::{Error, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
    pub use crate::retry::{CircuitBreaker, RetryConfig};
    pub use crate::validation::{ValidationResult, Validator};
}
