use thiserror::Error;

use crate::errors::workflow::WorkflowError;

/// Internal error type for store, service and workflow operations
///
/// Separates infrastructure failures (database, transactions, parsing,
/// hashing) from the typed workflow outcomes. This error type is NOT
/// exposed via the API; endpoints convert it explicitly to an
/// `ApiResponse` error enum.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Database transaction failed
    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Failed to parse a stored value (status, role, category, ...)
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    /// Cryptographic operation failed (hashing, token signing, ...)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    /// Typed workflow outcome (invalid edge, unauthorized, conflict, ...)
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Duplicate username on registration
    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    /// Invalid username or password
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a transaction error with context
    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// The workflow outcome carried by this error, if any
    pub fn as_workflow(&self) -> Option<&WorkflowError> {
        match self {
            Self::Workflow(w) => Some(w),
            _ => None,
        }
    }
}
