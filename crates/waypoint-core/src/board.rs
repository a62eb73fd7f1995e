//! Presentation-side trip state.
//!
//! [`TripBoard`] is what a screen binds to: the last canonical listing of the
//! user's trips, the last error message and the swap selection. It never
//! edits its cached trips by hand. Every successful mutation is followed by a
//! refetch; a failed one leaves the cache as it was and records the error.

use log::{debug, warn};

use crate::{
    error::{Result, TripError},
    manager::TripManager,
    models::{
        NewTrip, Session, Step, StepStatus, SwapSelection, Trip, TripAction, TripGroups,
        TripStatus,
    },
};

/// Cached trips, error and swap selection for one session.
#[derive(Debug)]
pub struct TripBoard {
    manager: TripManager,
    session: Session,
    trips: TripGroups,
    last_error: Option<String>,
    selection: SwapSelection,
}

impl TripBoard {
    /// Creates an empty board; call [`TripBoard::refresh`] to load trips.
    pub fn new(manager: TripManager, session: Session) -> Self {
        Self {
            manager,
            session,
            trips: TripGroups::default(),
            last_error: None,
            selection: SwapSelection::default(),
        }
    }

    /// Trips as of the last successful fetch.
    pub fn trips(&self) -> &TripGroups {
        &self.trips
    }

    /// Message of the last failed operation, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a mutating operation is running.
    pub fn is_busy(&self) -> bool {
        self.manager.has_pending_operations()
    }

    pub fn selection(&self) -> &SwapSelection {
        &self.selection
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reloads the canonical trip listing.
    pub async fn refresh(&mut self) -> Result<&TripGroups> {
        match self.manager.trip_groups(&self.session).await {
            Ok(trips) => {
                self.trips = trips;
                self.last_error = None;
                Ok(&self.trips)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Creates a trip and reloads.
    pub async fn create_trip(&mut self, trip: NewTrip) -> Result<Trip> {
        let result = self.manager.create_trip(&self.session, trip).await;
        self.settle(result).await
    }

    /// Sets a trip's status and reloads.
    pub async fn set_trip_status(&mut self, trip_id: u64, status: TripStatus) -> Result<Trip> {
        let result = self
            .manager
            .set_trip_status(&self.session, trip_id, status)
            .await;
        self.settle(result).await
    }

    /// Applies a named trip action and reloads.
    pub async fn apply(&mut self, trip_id: u64, action: TripAction) -> Result<Trip> {
        self.set_trip_status(trip_id, action.target()).await
    }

    /// Deletes a trip and reloads.
    pub async fn delete_trip(&mut self, trip_id: u64, confirmed: bool) -> Result<Trip> {
        let result = self
            .manager
            .delete_trip(&self.session, trip_id, confirmed)
            .await;
        self.settle(result).await
    }

    /// Sets a step's status and reloads.
    pub async fn set_step_status(&mut self, step_id: u64, status: StepStatus) -> Result<Step> {
        let result = self
            .manager
            .set_step_status(&self.session, step_id, status)
            .await;
        self.settle(result).await
    }

    /// Removes a step and reloads.
    pub async fn remove_step(&mut self, step_id: u64) -> Result<Step> {
        let result = self.manager.remove_step(&self.session, step_id).await;
        self.settle(result).await
    }

    /// Toggles `step_id` in the swap selection. When two steps are selected
    /// they are swapped, the selection is cleared and the board reloads.
    ///
    /// Returns the swapped pair, or `None` if the swap is still waiting for a
    /// second step. A failed swap keeps both steps selected.
    pub async fn select_for_swap(&mut self, step_id: u64) -> Result<Option<(u64, u64)>> {
        self.selection.toggle(step_id);
        let (first, second) = match *self.selection.selected() {
            [first, second] => (first, second),
            _ => return Ok(None),
        };

        let result = self
            .manager
            .swap_steps(&self.session, first, second)
            .await
            .map(|()| (first, second));
        if result.is_ok() {
            self.selection.clear();
        }
        self.settle(result).await.map(Some)
    }

    /// Refetch after success; record the error and keep the cache after
    /// failure. `Busy` is neither, since nothing was attempted.
    ///
    /// A committed mutation is reported as such even if the refetch fails;
    /// the refetch error lands in [`TripBoard::last_error`] and the cache
    /// stays stale until the next successful refresh.
    async fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                if let Err(e) = self.refresh().await {
                    debug!("Operation committed but reload failed: {e}");
                }
                Ok(value)
            }
            Err(e @ TripError::Busy { .. }) => {
                debug!("Ignoring duplicate operation: {e}");
                Err(e)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    fn record(&mut self, error: TripError) -> TripError {
        warn!("Trip operation failed: {error}");
        self.last_error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        manager::{OperationKey, TripManagerBuilder},
        models::{NewStep, Place},
    };

    async fn create_test_board() -> (TempDir, TripBoard) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = TripManagerBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .expect("Failed to create manager");
        manager
            .add_place(Place {
                id: "P1".to_string(),
                name: "Castle".to_string(),
                description: None,
                address: None,
                city: None,
                category: None,
                rating: None,
                image: None,
                external_link: None,
                latitude: None,
                longitude: None,
                created_at: jiff::Timestamp::now(),
            })
            .await
            .expect("Failed to seed place");
        let session = Session::new("alice").expect("valid session");
        (temp_dir, TripBoard::new(manager, session))
    }

    #[tokio::test]
    async fn test_failed_swap_keeps_selection() {
        let (_temp_dir, mut board) = create_test_board().await;
        let lisbon = board
            .create_trip(NewTrip::new(
                "Lisbon",
                None,
                date(2024, 6, 1),
                date(2024, 6, 2),
                vec![NewStep::new("P1"), NewStep::new("P1")],
            ))
            .await
            .unwrap();
        let porto = board
            .create_trip(NewTrip::new(
                "Porto",
                None,
                date(2024, 7, 1),
                date(2024, 7, 1),
                vec![NewStep::new("P1")],
            ))
            .await
            .unwrap();

        let first = lisbon.steps[0].id;
        let other_trip = porto.steps[0].id;
        assert_eq!(board.select_for_swap(first).await.unwrap(), None);

        let result = board.select_for_swap(other_trip).await;
        assert!(matches!(result, Err(TripError::InvalidInput { .. })));
        assert_eq!(board.selection().selected(), &[first, other_trip]);
        assert!(board.last_error().is_some());

        // Picking a step of the same trip evicts the oldest and swaps.
        let second = lisbon.steps[1].id;
        board.select_for_swap(first).await.unwrap();
        assert_eq!(board.selection().selected(), &[other_trip]);
        board.select_for_swap(other_trip).await.unwrap();
        assert!(board.selection().is_empty());

        board.select_for_swap(first).await.unwrap();
        let swapped = board.select_for_swap(second).await.unwrap();
        assert_eq!(swapped, Some((first, second)));
        assert!(board.selection().is_empty());
        assert!(board.last_error().is_none());
    }

    #[tokio::test]
    async fn test_busy_swap_keeps_selection() {
        let (_temp_dir, mut board) = create_test_board().await;
        let trip = board
            .create_trip(NewTrip::new(
                "Lisbon",
                None,
                date(2024, 6, 1),
                date(2024, 6, 2),
                vec![NewStep::new("P1"), NewStep::new("P1")],
            ))
            .await
            .unwrap();
        let (first, second) = (trip.steps[0].id, trip.steps[1].id);

        let guard = board
            .manager
            .begin(OperationKey::swap(first, second))
            .unwrap();
        board.select_for_swap(first).await.unwrap();
        let result = board.select_for_swap(second).await;
        assert!(matches!(result, Err(TripError::Busy { .. })));
        assert_eq!(board.selection().selected(), &[first, second]);
        assert!(board.last_error().is_none());

        drop(guard);
        assert_eq!(board.select_for_swap(second).await.unwrap(), None);
        let swapped = board.select_for_swap(second).await.unwrap();
        assert_eq!(swapped, Some((first, second)));
        assert!(board.selection().is_empty());
    }

    #[tokio::test]
    async fn test_committed_mutation_survives_failed_reload() {
        let (_temp_dir, mut board) = create_test_board().await;
        let lisbon = board
            .create_trip(NewTrip::new(
                "Lisbon",
                None,
                date(2024, 6, 1),
                date(2024, 6, 1),
                vec![NewStep::new("P1")],
            ))
            .await
            .unwrap();

        let conn = rusqlite::Connection::open(board.manager.database_path()).unwrap();
        conn.execute(
            "UPDATE trips SET created_at = 'not a timestamp' WHERE id = ?1",
            [lisbon.id as i64],
        )
        .unwrap();

        let porto = board
            .create_trip(NewTrip::new(
                "Porto",
                None,
                date(2024, 7, 1),
                date(2024, 7, 1),
                vec![NewStep::new("P1")],
            ))
            .await
            .unwrap();
        assert_eq!(porto.title, "Porto");
        assert!(board.last_error().is_some());
        assert_eq!(board.trips().in_progress.len(), 1);

        let stored = board
            .manager
            .get_trip(board.session(), porto.id)
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_busy_is_not_recorded() {
        let (_temp_dir, mut board) = create_test_board().await;
        let trip = board
            .create_trip(NewTrip::new(
                "Lisbon",
                None,
                date(2024, 6, 1),
                date(2024, 6, 1),
                vec![NewStep::new("P1")],
            ))
            .await
            .unwrap();

        let guard = board
            .manager
            .begin(OperationKey::TripStatus { trip_id: trip.id })
            .unwrap();
        assert!(board.is_busy());

        let result = board.apply(trip.id, TripAction::Hold).await;
        assert!(matches!(result, Err(TripError::Busy { .. })));
        assert!(board.last_error().is_none());
        assert_eq!(board.trips().in_progress.len(), 1);

        drop(guard);
        board.apply(trip.id, TripAction::Hold).await.unwrap();
        assert_eq!(board.trips().planned.len(), 1);
    }
}
