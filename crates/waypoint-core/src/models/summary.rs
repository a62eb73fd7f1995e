//! Trip summary types and functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{StepStatus, Trip, TripStatus};

/// Summary information about a trip with step statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripSummary {
    /// Trip ID
    pub id: u64,
    /// Title of the trip
    pub title: String,
    /// Free-form description of the trip
    pub description: Option<String>,
    /// Trip status
    pub status: TripStatus,
    /// First day of the trip
    pub start_date: Date,
    /// Last day of the trip
    pub end_date: Date,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of visited steps
    pub visited_steps: u32,
    /// Number of skipped steps
    pub skipped_steps: u32,
}

impl TripSummary {
    /// Create a TripSummary from a Trip and step counts
    pub fn from_trip(trip: Trip, total_steps: u32, visited_steps: u32, skipped_steps: u32) -> Self {
        Self {
            id: trip.id,
            title: trip.title,
            description: trip.description,
            status: trip.status,
            start_date: trip.start_date,
            end_date: trip.end_date,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
            total_steps,
            visited_steps,
            skipped_steps,
        }
    }

    /// Steps neither visited nor skipped.
    pub fn remaining_steps(&self) -> u32 {
        self.total_steps
            .saturating_sub(self.visited_steps + self.skipped_steps)
    }
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        let count = |status: StepStatus| {
            trip.steps.iter().filter(|step| step.status == status).count() as u32
        };

        Self {
            id: trip.id,
            title: trip.title.clone(),
            description: trip.description.clone(),
            status: trip.status,
            start_date: trip.start_date,
            end_date: trip.end_date,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
            total_steps: trip.steps.len() as u32,
            visited_steps: count(StepStatus::Visited),
            skipped_steps: count(StepStatus::Skipped),
        }
    }
}
