//! Exit code standardization for awscost
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, validation failure)
//! - `2` = System error (I/O, malformed JSON, unreadable pricing data)
//! - `3` = Configuration error (config or scenario file cannot be parsed)

use crate::error::CostError;

/// Standard exit codes for awscost
pub mod codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (I/O, malformed data)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (invalid config file)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a CostError to an appropriate exit code
pub fn exit_code_for_error(error: &CostError) -> i32 {
    use CostError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,

        Validation { .. } => codes::USER_ERROR,
        InvalidInput(_) => codes::USER_ERROR,

        Pricing(_) => codes::SYSTEM_ERROR,
        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Exit code for an error that reached `main`
///
/// Walks the anyhow chain looking for a `CostError`; anything else is a
/// system error.
pub fn exit_code_for_anyhow(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CostError>())
        .map(exit_code_for_error)
        .unwrap_or(codes::SYSTEM_ERROR)
}
