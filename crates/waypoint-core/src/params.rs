//! Parameter structures for Waypoint operations
//!
//! These are the string-typed inputs shared by every interface (CLI, MCP).
//! They carry no framework derives beyond serde; JSON schema generation is
//! enabled with the `schema` feature. Interface layers wrap or convert into
//! them, and the core converts them into typed requests (see
//! [`crate::models::requests`]) which is where parsing and validation happen.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates are `YYYY-MM-DD`. Times are RFC 3339 timestamps
//! (`2024-06-01T14:00:00Z`) or civil date-times (`2024-06-01T14:00`) read in
//! the system time zone.

use std::str::FromStr;

use jiff::{civil, tz::TimeZone, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TripError},
    models::{StepStatus, TripStatus},
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_trip, hold_trip, resume_trip, complete_trip, restart_trip,
/// show_step, visit_step and the other single-target operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// One step of a trip being created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepPlan {
    /// ID of the place to visit
    pub place_id: String,
    /// Optional arrival time
    #[serde(default)]
    pub start_time: Option<String>,
    /// Optional departure time
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Parameters for creating a new trip.
///
/// The first step starts in progress, the others pending. At least one step
/// is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTrip {
    /// Title of the trip (required)
    pub title: String,
    /// Optional description of the trip
    #[serde(default)]
    pub description: Option<String>,
    /// First day of the trip (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the trip (YYYY-MM-DD); raised to the start date if earlier
    pub end_date: String,
    /// Places to visit, in order
    #[serde(default)]
    pub steps: Vec<StepPlan>,
}

/// Parameters for listing trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTrips {
    /// Only trips with this status ('planned', 'in_progress', 'completed')
    #[serde(default)]
    pub status: Option<String>,
    /// Only trips whose title contains this text (case-insensitive)
    #[serde(default)]
    pub title: Option<String>,
}

/// Parameters for setting a trip's status directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTripStatus {
    /// Trip ID
    pub id: u64,
    /// New status ('planned', 'in_progress', 'completed')
    pub status: String,
}

impl SetTripStatus {
    /// Parse the requested status.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{models::TripStatus, params::SetTripStatus};
    ///
    /// let params = SetTripStatus { id: 1, status: "completed".to_string() };
    /// assert_eq!(params.validate()?, TripStatus::Completed);
    ///
    /// let params = SetTripStatus { id: 1, status: "archived".to_string() };
    /// assert!(params.validate().is_err());
    /// # Ok::<(), waypoint_core::TripError>(())
    /// ```
    pub fn validate(&self) -> Result<TripStatus> {
        TripStatus::from_str(&self.status).map_err(|_| {
            TripError::invalid_input("status").with_reason(format!(
                "Invalid status: {}. Must be 'planned', 'in_progress', or 'completed'",
                self.status
            ))
        })
    }
}

/// Parameters for setting a step's status directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetStepStatus {
    /// Step ID
    pub id: u64,
    /// New status ('pending', 'in_progress', 'visited', 'skipped')
    pub status: String,
}

impl SetStepStatus {
    /// Parse the requested status.
    pub fn validate(&self) -> Result<StepStatus> {
        StepStatus::from_str(&self.status).map_err(|_| {
            TripError::invalid_input("status").with_reason(format!(
                "Invalid status: {}. Must be 'pending', 'in_progress', 'visited', or 'skipped'",
                self.status
            ))
        })
    }
}

/// Parameters for swapping the order of two steps.
///
/// Both steps must belong to the same trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SwapSteps {
    /// ID of the first step to swap
    pub step1_id: u64,
    /// ID of the second step to swap
    pub step2_id: u64,
}

/// Parameters for deleting a trip and all of its steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteTrip {
    /// Trip ID
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for appending a step to a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddStep {
    /// ID of the trip to add the step to
    pub trip_id: u64,
    /// Base step fields
    #[serde(flatten)]
    pub step: StepPlan,
}

/// Parameters for editing a step's place or times.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// Step ID to update (required)
    pub id: u64,
    /// New place for the step
    #[serde(default)]
    pub place_id: Option<String>,
    /// New arrival time
    #[serde(default)]
    pub start_time: Option<String>,
    /// New departure time
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Parameters for editing a trip's details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTrip {
    /// Trip ID to update (required)
    pub id: u64,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New first day (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// New last day (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Parameters for adding or replacing a catalog place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddPlace {
    /// Catalog key of the place
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Category (museum, park, ...)
    #[serde(default)]
    pub category: Option<String>,
    /// Rating between 0 and 5
    #[serde(default)]
    pub rating: Option<f64>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// External link
    #[serde(default)]
    pub external_link: Option<String>,
    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Parameters for browsing the place catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlaces {
    /// Only this category
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for operations on one catalog place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlaceId {
    /// Catalog key of the place
    pub id: String,
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<civil::Date> {
    civil::Date::from_str(value.trim()).map_err(|e| {
        TripError::invalid_input(field)
            .with_reason(format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

/// Parse a step time: an RFC 3339 timestamp, or a civil date-time in the
/// system time zone.
pub fn parse_time(field: &str, value: &str) -> Result<Timestamp> {
    let value = value.trim();
    if let Ok(timestamp) = Timestamp::from_str(value) {
        return Ok(timestamp);
    }

    civil::DateTime::from_str(value)
        .and_then(|dt| dt.to_zoned(TimeZone::system()))
        .map(|zoned| zoned.timestamp())
        .map_err(|e| {
            TripError::invalid_input(field)
                .with_reason(format!("Invalid time '{value}', expected YYYY-MM-DDTHH:MM: {e}"))
        })
}

/// Parse an optional time, treating blank strings as absent.
pub(crate) fn parse_optional_time(field: &str, value: Option<&str>) -> Result<Option<Timestamp>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_time(field, v))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("start_date", "2024-06-01").unwrap();
        assert_eq!(date, civil::date(2024, 6, 1));

        match parse_date("start_date", "June 1st") {
            Err(TripError::InvalidInput { field, reason }) => {
                assert_eq!(field, "start_date");
                assert!(reason.contains("June 1st"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_time_rfc3339() {
        let time = parse_time("start_time", "2024-06-01T14:00:00Z").unwrap();
        assert_eq!(time, Timestamp::from_second(1_717_250_400).unwrap());
    }

    #[test]
    fn test_parse_time_civil() {
        assert!(parse_time("start_time", "2024-06-01T14:00").is_ok());
        assert!(parse_time("start_time", "2024-06-01 14:00").is_ok());
        assert!(parse_time("start_time", "2pm").is_err());
    }

    #[test]
    fn test_parse_optional_time_blank() {
        assert_eq!(parse_optional_time("end_time", Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_time("end_time", None).unwrap(), None);
    }

    #[test]
    fn test_set_step_status_validate() {
        let params = SetStepStatus {
            id: 3,
            status: "skipped".to_string(),
        };
        assert_eq!(params.validate().unwrap(), StepStatus::Skipped);

        let params = SetStepStatus {
            id: 3,
            status: "done".to_string(),
        };
        match params.validate() {
            Err(TripError::InvalidInput { field, reason }) => {
                assert_eq!(field, "status");
                assert!(reason.contains("Invalid status: done"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_trip_deserializes_without_optional_fields() {
        let json = r#"{
            "title": "Weekend Trip",
            "start_date": "2024-06-01",
            "end_date": "2024-06-02",
            "steps": [{ "place_id": "P1" }]
        }"#;
        let params: CreateTrip = serde_json::from_str(json).unwrap();
        assert_eq!(params.steps.len(), 1);
        assert!(params.description.is_none());
        assert!(params.steps[0].start_time.is_none());
    }

    #[test]
    fn test_add_step_flattens_step_fields() {
        let json = r#"{ "trip_id": 4, "place_id": "P2", "end_time": "2024-06-01T16:00:00Z" }"#;
        let params: AddStep = serde_json::from_str(json).unwrap();
        assert_eq!(params.trip_id, 4);
        assert_eq!(params.step.place_id, "P2");
        assert!(params.step.end_time.is_some());
    }
}
