//! One-line operation messages.

use std::fmt;

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    /// Nothing happened, e.g. the same operation was already running
    Skipped,
}

/// Wrapper type for displaying short operation outcomes.
pub struct OperationStatus {
    pub message: String,
    pub outcome: Outcome,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            outcome: Outcome::Success,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            outcome: Outcome::Failure,
        }
    }

    /// Create a status for an operation that was not carried out.
    pub fn skipped(message: String) -> Self {
        Self {
            message,
            outcome: Outcome::Skipped,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.outcome {
            Outcome::Success => "Success:",
            Outcome::Failure => "Error:",
            Outcome::Skipped => "Skipped:",
        };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Trip completed".to_string());
        assert_eq!(success.to_string(), "Success: Trip completed\n");

        let failure = OperationStatus::failure("Trip not found".to_string());
        assert!(failure.to_string().starts_with("Error:"));

        let skipped = OperationStatus::skipped("Already running".to_string());
        assert!(skipped.to_string().starts_with("Skipped:"));
    }
}
