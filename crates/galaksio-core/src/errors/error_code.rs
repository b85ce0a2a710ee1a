//! GalaksioErrorCode trait for the JSON response boundary.

/// Trait for converting Galaksio errors to stable error codes.
/// Every error enum implements this so the HTTP shim can report a
/// structured code alongside the human-readable message.
pub trait GalaksioErrorCode {
    /// Returns the error code string (e.g., "INVALID_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the response boundary.
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const GALAXY_ERROR: &str = "GALAXY_ERROR";
pub const GALAXY_UNAVAILABLE: &str = "GALAXY_UNAVAILABLE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const COLLECTION_EXISTS: &str = "COLLECTION_EXISTS";
