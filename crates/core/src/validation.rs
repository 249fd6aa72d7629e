//! Input validation
//!
//! Every form the user fills in (sign up, login, new event, event
//! registration, password reset) is checked locally before anything is sent
//! to the server, so the user gets all problems at once instead of one
//! server round trip per mistake.
//!
//! # Example
//!
//! ```rust
//! use eventmanager_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Ada")
//!     .email("email", "ada@uni.edu")
//!     .min_length("password", "secret1", 6)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Same shape the mobile client accepted: local part, `@`, dotted domain.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+._%\-]{1,256}@[A-Za-z0-9][A-Za-z0-9\-]{0,64}(\.[A-Za-z0-9][A-Za-z0-9\-]{0,25})+$")
        .expect("email pattern is valid")
});

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Machine-readable code
    pub code: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether a specific field failed
    #[must_use]
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// All errors joined into one line
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", self.summary()),
            ))
        }
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, field: &str, code: &str, message: impl Into<String>) -> Self {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message: message.into(),
            code: code.to_string(),
        });
        self
    }

    /// Fails when the value is empty or whitespace
    #[must_use]
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field, "REQUIRED", "is required")
        } else {
            self
        }
    }

    /// Minimum length in characters; empty values are left to `required`
    #[must_use]
    pub fn min_length(self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if len > 0 && len < min {
            self.fail(field, "MIN_LENGTH", format!("must be at least {min} characters"))
        } else {
            self
        }
    }

    /// Maximum length in characters
    #[must_use]
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        if value.chars().count() > max {
            self.fail(field, "MAX_LENGTH", format!("must be at most {max} characters"))
        } else {
            self
        }
    }

    /// Email address shape; empty values are left to `required`
    #[must_use]
    pub fn email(self, field: &str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() && !is_valid_email(value) {
            self.fail(field, "EMAIL", "must be a valid email address")
        } else {
            self
        }
    }

    /// Match a regex pattern
    #[must_use]
    pub fn pattern(self, field: &str, value: &str, pattern: &Regex, description: &str) -> Self {
        if pattern.is_match(value) {
            self
        } else {
            self.fail(field, "PATTERN", format!("must be {description}"))
        }
    }

    /// Exactly `len` ASCII digits
    #[must_use]
    pub fn digits(self, field: &str, value: &str, len: usize) -> Self {
        let value = value.trim();
        if value.len() == len && value.chars().all(|c| c.is_ascii_digit()) {
            self
        } else {
            self.fail(field, "DIGITS", format!("must be {len} digits"))
        }
    }

    /// Value must be one of the allowed values
    #[must_use]
    pub fn one_of(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if allowed.contains(&value) {
            self
        } else {
            self.fail(field, "ONE_OF", format!("must be one of: {}", allowed.join(", ")))
        }
    }

    /// Like `one_of`, ignoring ASCII case and surrounding whitespace
    #[must_use]
    pub fn one_of_ignore_case(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        let value = value.trim();
        if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
            self
        } else {
            self.fail(field, "ONE_OF", format!("must be one of: {}", allowed.join(", ")))
        }
    }

    /// Numeric range, inclusive
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.fail(field, "RANGE", format!("must be between {min} and {max}"))
        } else {
            self
        }
    }

    /// Calendar date in `YYYY-MM-DD`; empty values are left to `required`
    #[must_use]
    pub fn date(self, field: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || parse_date(value).is_some() {
            self
        } else {
            self.fail(field, "DATE", "must be a date in YYYY-MM-DD format")
        }
    }

    /// Time of day in `HH:MM` or `HH:MM:SS`; empty values are left to `required`
    #[must_use]
    pub fn time(self, field: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || parse_time(value).is_some() {
            self
        } else {
            self.fail(field, "TIME", "must be a time in HH:MM format")
        }
    }

    /// Two values must match (password confirmation)
    #[must_use]
    pub fn equals(self, field: &str, value: &str, other: &str, message: &str) -> Self {
        if value == other {
            self
        } else {
            self.fail(field, "MISMATCH", message)
        }
    }

    /// Add a custom validation
    #[must_use]
    pub fn custom<F>(self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        match f() {
            Some(message) => self.fail(field, "CUSTOM", message),
            None => self,
        }
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Whether `value` looks like an email address
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse a `YYYY-MM-DD` date
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parse an `HH:MM` or `HH:MM:SS` time
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
