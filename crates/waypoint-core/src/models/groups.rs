//! Trips grouped by lifecycle status for display.

use serde::{Deserialize, Serialize};

use super::{Trip, TripStatus};

/// An owner's trips split into the three status sections shown to the user.
///
/// Each section keeps the order the trips were supplied in, which is start
/// date ascending when built from a database listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TripGroups {
    /// Trips currently being travelled
    pub in_progress: Vec<Trip>,
    /// Trips saved for later
    pub planned: Vec<Trip>,
    /// Finished trips
    pub completed: Vec<Trip>,
}

impl TripGroups {
    /// Splits trips by status, preserving their relative order.
    pub fn from_trips(trips: impl IntoIterator<Item = Trip>) -> Self {
        let mut groups = Self::default();
        for trip in trips {
            match trip.status {
                TripStatus::InProgress => groups.in_progress.push(trip),
                TripStatus::Planned => groups.planned.push(trip),
                TripStatus::Completed => groups.completed.push(trip),
            }
        }
        groups
    }

    /// Trips in the section for `status`.
    pub fn get(&self, status: TripStatus) -> &[Trip] {
        match status {
            TripStatus::InProgress => &self.in_progress,
            TripStatus::Planned => &self.planned,
            TripStatus::Completed => &self.completed,
        }
    }

    /// Total number of trips across all sections.
    pub fn len(&self) -> usize {
        self.in_progress.len() + self.planned.len() + self.completed.len()
    }

    /// Whether there are no trips at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All trips in display order: in progress, planned, completed.
    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        TripStatus::ALL
            .into_iter()
            .flat_map(move |status| self.get(status).iter())
    }

    /// Finds a trip by ID in any section.
    pub fn find(&self, trip_id: u64) -> Option<&Trip> {
        self.iter().find(|trip| trip.id == trip_id)
    }
}
