//! Error types for awscost
//!
//! There are two error types: `CostError` (main error enum) and `ConfigError`
//! (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! The calculators never fail. Every number is accepted as given and every
//! missing external price degrades to a hard-coded constant, so nothing in
//! `services` returns a `Result`.
//!
//! Errors only come from the edges: reading config and scenario files,
//! loading or importing a pricing snapshot, and validating user input.
//! Library code uses `crate::error::Result<T>`; the binary uses
//! `anyhow::Result<T>` and maps back to `CostError` for exit codes
//! (see `exit_codes`).
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: config/scenario file parsing and field values
//!   - Automatically converted to `CostError::Config` via `#[from]`
//!
//! - `Validation`: a single value that cannot be parsed (tier, architecture,
//!   instance type)
//!
//! - `InvalidInput`: every field of a configuration outside the ranges the
//!   calculators expect (see `validation`)
//!   - Never raised by the calculators themselves
//!
//! - `Pricing`: pricing snapshot or raw price list could not be understood

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Main error type for awscost
#[derive(Error, Debug)]
pub enum CostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(ValidationErrors),

    #[error("Pricing data error: {0}")]
    Pricing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

impl CostError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = CostError::validation("memoryMB", "Memory must be between 128 MB and 10,240 MB");
        assert_eq!(
            err.to_string(),
            "Validation error: memoryMB - Memory must be between 128 MB and 10,240 MB"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: CostError = ConfigError::ParseError("bad toml".to_string()).into();
        assert!(matches!(err, CostError::Config(ConfigError::ParseError(_))));
        assert!(err.to_string().contains("bad toml"));
    }
}
