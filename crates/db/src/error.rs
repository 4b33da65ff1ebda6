//! Error types for the data access layer.
//!
//! Callers only ever see [`OperationFailed`]. Internally, queries return
//! [`RepositoryError`] so row-mapping problems stay distinguishable from
//! driver errors until the public boundary flattens them.

use complaint_desk_core::RequestError;
use thiserror::Error;

/// The single error kind surfaced by every data-access operation.
///
/// Covers connection failures, stored-routine errors, constraint violations
/// and rejected input alike. The message is the data store's own message
/// (for database errors, the server's text without driver framing).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct OperationFailed {
    operation: &'static str,
    message: String,
}

impl OperationFailed {
    /// Create an error for `operation` with a human-readable message.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    /// Name of the operation that failed (e.g. `add_complaint`).
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// The underlying message, without the operation prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_repository(operation: &'static str, err: RepositoryError) -> Self {
        Self::new(operation, err.into_message())
    }
}

impl From<RequestError> for OperationFailed {
    fn from(err: RequestError) -> Self {
        Self::new("validate", err.to_string())
    }
}

/// Errors that can occur while running a query, before they are flattened.
#[derive(Debug, Error)]
pub(crate) enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row came back in a shape the model cannot represent.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// Human-readable message with driver framing stripped.
    fn into_message(self) -> String {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => db_err.message().to_owned(),
            Self::Database(sqlx::Error::RowNotFound) => "no matching row".to_owned(),
            Self::Database(err) => err.to_string(),
            Self::DataCorruption(msg) => format!("data corruption: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use complaint_desk_core::requests::DeleteComplaint;

    use super::*;

    #[test]
    fn test_operation_failed_display() {
        let err = OperationFailed::new("delete_complaint", "complaint 9999 not found");
        assert_eq!(
            err.to_string(),
            "delete_complaint failed: complaint 9999 not found"
        );
        assert_eq!(err.operation(), "delete_complaint");
        assert_eq!(err.message(), "complaint 9999 not found");
    }

    #[test]
    fn test_request_error_becomes_validate_failure() {
        let Err(request_err) = DeleteComplaint::parse("") else {
            panic!("empty id must be rejected");
        };
        let err = OperationFailed::from(request_err);
        assert_eq!(err.operation(), "validate");
        assert_eq!(err.message(), "complaint id cannot be empty");
    }

    #[test]
    fn test_data_corruption_message() {
        let err = OperationFailed::from_repository(
            "list_complaints",
            RepositoryError::DataCorruption("unknown status 'Closed'".to_owned()),
        );
        assert_eq!(
            err.to_string(),
            "list_complaints failed: data corruption: unknown status 'Closed'"
        );
    }

    #[test]
    fn test_driver_error_keeps_message() {
        let err = OperationFailed::from_repository(
            "list_complaints",
            RepositoryError::Database(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(err.operation(), "list_complaints");
        assert!(!err.message().is_empty());
    }
}
