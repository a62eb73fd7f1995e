//! Explicit caller identity passed into every lifecycle operation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TripError};

/// The signed-in user on whose behalf operations run.
///
/// Every trip and step query is filtered by the session's owner, so rows
/// belonging to other users behave as if they did not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    owner_id: String,
}

impl Session {
    /// Creates a session for the given user identifier.
    ///
    /// # Errors
    ///
    /// Returns `TripError::InvalidInput` if the identifier is blank.
    pub fn new(owner_id: impl Into<String>) -> Result<Self> {
        let owner_id = owner_id.into();
        if owner_id.trim().is_empty() {
            return Err(TripError::invalid_input("owner_id").with_reason("User ID cannot be empty"));
        }
        Ok(Self { owner_id })
    }

    /// Identifier of the session's user.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
