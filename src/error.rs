//! Error handling for the record client
//!
//! Every failure that reaches an operator falls into one of two families:
//! a database operation failure (connectivity, constraint violation,
//! malformed statement) or a user input failure. Both are reported as a
//! message and never take the application down.

use thiserror::Error;

/// Main error type for every user-triggered operation
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failure reported by the MySQL driver, message kept verbatim
    #[cfg(feature = "database")]
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Failure reported by a store that is not backed by sqlx
    #[error("{0}")]
    Store(String),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True when the failure was caught before any statement was issued
    pub fn is_input(&self) -> bool {
        matches!(self, ClientError::Input(_))
    }

    /// The input failure, if this is one
    pub fn as_input(&self) -> Option<&InputError> {
        match self {
            ClientError::Input(e) => Some(e),
            _ => None,
        }
    }
}

/// User input failures, detected before touching the database
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Field '{label}' is required.")]
    RequiredField { label: String },

    #[error("Field '{label}' expects a number, got '{value}'.")]
    InvalidNumber { label: String, value: String },

    #[error("Enter a search term")]
    EmptySearchTerm,

    #[error("Select a row to {action}.")]
    NoRowSelected { action: &'static str },

    #[error("{table} is read-only.")]
    ReadOnlyTable { table: &'static str },

    #[error("Unknown manager: {name}")]
    UnknownManager { name: String },

    #[error("Column '{column}' is not present in the grid.")]
    MissingColumn { column: &'static str },
}

impl InputError {
    /// Failures raised before an action starts (nothing selected, nothing to
    /// search for, action unavailable), as opposed to a bad field value
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            InputError::RequiredField { .. } | InputError::InvalidNumber { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
