//! Error types for the order lifecycle library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{OrderStatus, Role};

/// Every failure an order operation can report.
///
/// None of these are fatal: callers show [`BrasaError::toast_message`] to the
/// operator, revert any optimistic change and allow a retry.
#[derive(Error, Debug)]
pub enum BrasaError {
    /// The requested move is not in the transition table for this role
    #[error("Cannot move order from {from} to {to} as {role}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
        role: Role,
    },
    /// The stored order no longer has the status the caller acted on
    #[error("Order {order_id} is no longer {expected} (now {actual})")]
    StaleState {
        order_id: u64,
        expected: OrderStatus,
        actual: OrderStatus,
    },
    /// Query, update or subscription against the store failed
    #[error("Backend unavailable: {message}")]
    BackendUnavailable {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A blocking store task panicked or was cancelled
    #[error("Backend unavailable: {message}")]
    BackendTask {
        message: String,
        #[source]
        source: tokio::task::JoinError,
    },
    /// Order not found for the given ID
    #[error("Order with ID {id} not found")]
    OrderNotFound { id: u64 },
    /// Clock-out requested for a user without an open shift
    #[error("User '{user_id}' has no open shift")]
    NoOpenShift { user_id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating backend errors with optional context.
pub struct BackendErrorBuilder {
    message: String,
}

impl BackendErrorBuilder {
    /// Create a new backend error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BrasaError {
        BrasaError::BackendUnavailable {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BrasaError {
        BrasaError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BrasaError {
    /// Creates a builder for backend errors.
    pub fn backend(message: impl Into<String>) -> BackendErrorBuilder {
        BackendErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a join failure from a blocking store task.
    pub(crate) fn join(source: tokio::task::JoinError) -> Self {
        let message = if source.is_panic() {
            "Store task panicked".to_string()
        } else {
            "Store task was cancelled".to_string()
        };
        Self::BackendTask { message, source }
    }

    /// Short operator-facing text for a transient notification.
    pub fn toast_message(&self) -> String {
        match self {
            Self::InvalidTransition { from, to, .. } => {
                format!("Order cannot go from {from} to {to}")
            }
            Self::StaleState {
                order_id, actual, ..
            } => format!("Order {order_id} was already taken (now {actual})"),
            Self::BackendUnavailable { .. } | Self::BackendTask { .. } => {
                "Could not reach the order store".to_string()
            }
            Self::OrderNotFound { id } => format!("Order {id} not found"),
            Self::NoOpenShift { .. } => "No open shift to close".to_string(),
            other => other.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BrasaError::backend(message).with_source(e))
    }
}

/// Result type alias for order operations
pub type Result<T> = std::result::Result<T, BrasaError>;
