//! Stable error codes for the CLI boundary.

/// Every error enum maps to a structured code so scripts driving the CLI can
/// branch on failures without parsing prose.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "CATALOG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const UNKNOWN_DIALECT: &str = "UNKNOWN_DIALECT";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DISCOVERY_ERROR: &str = "DISCOVERY_ERROR";
pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const CLONE_ERROR: &str = "CLONE_ERROR";
