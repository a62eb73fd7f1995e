//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Place, StepStatus};

/// Represents one ordered visit to a place within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent trip
    pub trip_id: u64,

    /// Position of the step within the trip (1-based, dense)
    pub step_num: u32,

    /// Catalog key of the visited place
    pub place_id: String,

    /// The referenced place, when present in the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,

    /// Planned arrival time
    pub start_time: Option<Timestamp>,

    /// Planned departure time
    pub end_time: Option<Timestamp>,

    /// Current status of the step
    pub status: StepStatus,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Step {
    /// Name to show for the step: the place name, or its ID when the place is
    /// missing from the catalog.
    pub fn name(&self) -> &str {
        self.place
            .as_ref()
            .map(|place| place.name.as_str())
            .unwrap_or(&self.place_id)
    }
}
