//! Error types for the trip lifecycle library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::TripStatus;

/// Comprehensive error type for all trip lifecycle operations.
#[derive(Error, Debug)]
pub enum TripError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Trip not found for the given ID (or not owned by the session)
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// Step not found for the given ID (or not owned by the session)
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// Place not present in the catalog
    #[error("Place with ID '{id}' not found")]
    PlaceNotFound { id: String },
    /// Trip status change not permitted by the transition table
    #[error("Cannot change trip status from '{from}' to '{to}'")]
    InvalidTransition { from: TripStatus, to: TripStatus },
    /// Another step of the same trip is already in progress
    #[error("Step {step_id} of trip {trip_id} is already in progress")]
    StepAlreadyActive { trip_id: u64, step_id: u64 },
    /// The owner already has a trip in progress
    #[error("Trip with ID {id} is already in progress for this user")]
    ActiveTripExists { id: u64 },
    /// The same operation is still in flight
    #[error("Operation '{operation}' is already in progress")]
    Busy { operation: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
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

/// Broad category of a [`TripError`], used by callers to decide how to
/// surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any persistence call
    Validation,
    /// Rejected by the trip or step state machine
    Transition,
    /// The referenced row does not exist for this session
    NotFound,
    /// Failed at the persistence boundary
    Persistence,
    /// Identical operation already in flight; safe to ignore
    Busy,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TripError {
        TripError::Database {
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
    pub fn with_reason(self, reason: impl Into<String>) -> TripError {
        TripError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TripError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Error raised when a background task fails to join.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// Classify the error for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::InvalidTransition { .. }
            | Self::StepAlreadyActive { .. }
            | Self::ActiveTripExists { .. } => ErrorKind::Transition,
            Self::TripNotFound { .. } | Self::StepNotFound { .. } | Self::PlaceNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Busy { .. } => ErrorKind::Busy,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. }
            | Self::Configuration { .. } => ErrorKind::Persistence,
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
        self.map_err(|e| TripError::database(message).with_source(e))
    }
}

/// Result type alias for trip lifecycle operations
pub type Result<T> = std::result::Result<T, TripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let validation = TripError::invalid_input("steps").with_reason("empty");
        assert_eq!(validation.kind(), ErrorKind::Validation);

        let transition = TripError::InvalidTransition {
            from: TripStatus::Completed,
            to: TripStatus::Planned,
        };
        assert_eq!(transition.kind(), ErrorKind::Transition);
        assert_eq!(
            transition.to_string(),
            "Cannot change trip status from 'completed' to 'planned'"
        );

        let busy = TripError::Busy {
            operation: "create_trip".to_string(),
        };
        assert_eq!(busy.kind(), ErrorKind::Busy);

        let missing = TripError::PlaceNotFound {
            id: "P9".to_string(),
        };
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.to_string(), "Place with ID 'P9' not found");
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        match result.db_context("Failed to load trip") {
            Err(TripError::Database { message, .. }) => {
                assert_eq!(message, "Failed to load trip");
            }
            other => panic!("Expected database error, got {other:?}"),
        }
    }
}
