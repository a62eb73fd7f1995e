//! Result wrapper types for displaying operation outcomes.
//!
//! Each wrapper prints a one-line confirmation followed by the affected
//! resource.

use std::fmt;

use crate::models::{Place, Step, Trip};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created trip with ID: {} ({} steps)",
            self.resource.id,
            self.resource.steps.len()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added step with ID: {} to trip {}",
            self.resource.id, self.resource.trip_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Place> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved place with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Optionally lists the changes that were made.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use waypoint_core::{
///     display::UpdateResult,
///     models::{Trip, TripStatus},
/// };
///
/// let trip = Trip {
///     id: 3,
///     owner_id: "alice".to_string(),
///     title: "Weekend Trip".to_string(),
///     description: None,
///     start_date: date(2024, 6, 1),
///     end_date: date(2024, 6, 2),
///     status: TripStatus::Completed,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     steps: vec![],
/// };
///
/// let result = UpdateResult::with_changes(trip, vec!["Status: in_progress -> completed".to_string()]);
/// let output = result.to_string();
/// assert!(output.starts_with("Updated trip with ID: 3"));
/// assert!(output.contains("Changes made:\n- Status: in_progress -> completed"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated trip with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated step with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted trip '{}' (ID: {}) and its {} steps",
            self.resource.title,
            self.resource.id,
            self.resource.steps.len()
        )
    }
}

impl fmt::Display for DeleteResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed step {} '{}' (ID: {}) from trip {}",
            self.resource.step_num,
            self.resource.name(),
            self.resource.id,
            self.resource.trip_id
        )
    }
}
