//! Error types for search scope construction and execution.
//!
//! Errors are split by category: validation errors raised while a scope is
//! being built, fragment errors for strategy output that breaks the
//! placeholder contract, and backend errors passed through from the store.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all scope operations.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// Invalid input detected while building a scope
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Strategy output that violates the placeholder contract
    #[error(transparent)]
    Fragment(#[from] FragmentError),

    /// Errors reported by the data store
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised while validating search input or options.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A field name cannot be used as a SQL identifier.
    #[error("invalid identifier '{identifier}': {message}")]
    InvalidIdentifier { identifier: String, message: String },

    /// A search field is not a column of the target table.
    #[error("unknown field '{field}' for table '{table}'")]
    UnknownField { field: String, table: String },

    /// A search option has an unusable value.
    #[error("invalid search option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// A record field holds a value that cannot be bound as a search term.
    #[error("field '{field}' holds an unsupported {kind} value")]
    UnsupportedFieldValue { field: String, kind: String },

    /// An example record could not be inspected.
    #[error("invalid search record: {message}")]
    InvalidRecord { message: String },
}

/// Errors in fragments produced by a search format.
#[derive(Error, Debug)]
pub enum FragmentError {
    /// A fragment carries more than one placeholder.
    #[error("strategy fragment must contain exactly 0 or 1 placeholder, found {count} in `{fragment}`")]
    TooManyPlaceholders { fragment: String, count: usize },

    /// A rendered statement binds a different number of values than it has placeholders.
    #[error("statement has {placeholders} placeholder(s) but {params} bound value(s)")]
    ParameterMismatch { placeholders: usize, params: usize },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for scope operations.
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Result type alias for validation steps.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::InvalidRecord {
            message: err.to_string(),
        }
    }
}
