//! Centralized error types for the shop backend.

use thiserror::Error;

/// Main error type for shop operations.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Missing or malformed input. Never reaches a datastore.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation in a store.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credential mismatch.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any datastore call failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for shop operations.
pub type ShopResult<T> = Result<T, ShopError>;

impl ShopError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error from any displayable cause.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Self::Storage(cause.to_string())
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(format!("JSON error: {}", e))
    }
}

impl From<std::io::Error> for ShopError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(format!("IO error: {}", e))
    }
}

/// Reject empty or whitespace-only input for a named field.
pub(crate) fn require_non_empty(field: &str, value: &str) -> ShopResult<()> {
    if value.trim().is_empty() {
        return Err(ShopError::validation(format!("Missing required field: {}", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("customer", "alice").is_ok());
        assert!(matches!(require_non_empty("customer", ""), Err(ShopError::Validation(_))));
        assert!(matches!(require_non_empty("customer", "   "), Err(ShopError::Validation(_))));
    }

    #[test]
    fn test_io_error_is_storage() {
        let err: ShopError = std::io::Error::other("disk full").into();
        assert!(matches!(err, ShopError::Storage(msg) if msg.contains("disk full")));
    }
}
