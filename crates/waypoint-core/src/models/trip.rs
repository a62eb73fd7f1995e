//! Trip model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Step, StepStatus, TripStatus};

/// Represents a user-owned itinerary with its ordered steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Identifier of the user who owns the trip
    pub owner_id: String,

    /// Title of the trip
    pub title: String,

    /// Free-form description of the trip
    pub description: Option<String>,

    /// First day of the trip
    pub start_date: Date,

    /// Last day of the trip (never before `start_date`)
    pub end_date: Date,

    /// Lifecycle status of the trip
    #[serde(default)]
    pub status: TripStatus,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,

    /// Steps ordered by `step_num`
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Trip {
    /// The step currently in progress, if any.
    pub fn active_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::InProgress)
    }

    /// Looks up one of the trip's steps by ID.
    pub fn step(&self, step_id: u64) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == step_id)
    }
}
