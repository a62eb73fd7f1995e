//! Trip operations for the TripManager.

use log::debug;

use super::{OperationKey, TripManager};
use crate::{
    error::{Result, TripError},
    models::{
        NewTrip, Session, Trip, TripAction, TripFilter, TripGroups, TripStatus, TripSummary,
        UpdateTripRequest,
    },
};

impl TripManager {
    /// Creates a trip with its steps.
    ///
    /// The trip starts `in_progress` with its first step `in_progress` and the
    /// others `pending`. Validation failures (no steps, blank title, a step
    /// ending before it starts) are reported before anything is written; an
    /// unknown place aborts the whole creation.
    pub async fn create_trip(&self, session: &Session, trip: NewTrip) -> Result<Trip> {
        let owner_id = session.owner_id().to_string();
        let _guard = self.begin(OperationKey::CreateTrip {
            owner_id: owner_id.clone(),
        })?;
        debug!("Creating trip '{}' for {owner_id}", trip.title);

        let trip = trip.validate()?;
        self.with_db(move |db| db.create_trip(&owner_id, trip)).await
    }

    /// Retrieves a trip with its steps, or `None` if the session's user has
    /// no such trip.
    pub async fn get_trip(&self, session: &Session, trip_id: u64) -> Result<Option<Trip>> {
        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.get_trip(&owner_id, trip_id)).await
    }

    /// Like [`TripManager::get_trip`] but missing trips are an error.
    pub async fn require_trip(&self, session: &Session, trip_id: u64) -> Result<Trip> {
        self.get_trip(session, trip_id)
            .await?
            .ok_or(TripError::TripNotFound { id: trip_id })
    }

    /// Lists the user's trips by start date, each with steps and places.
    pub async fn list_trips(
        &self,
        session: &Session,
        filter: Option<TripFilter>,
    ) -> Result<Vec<Trip>> {
        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.list_trips(&owner_id, filter.as_ref()))
            .await
    }

    /// The user's trips grouped by status.
    pub async fn trip_groups(&self, session: &Session) -> Result<TripGroups> {
        let trips = self.list_trips(session, None).await?;
        Ok(TripGroups::from_trips(trips))
    }

    /// Lists compact trip summaries with step counts.
    pub async fn list_trip_summaries(
        &self,
        session: &Session,
        filter: Option<TripFilter>,
    ) -> Result<Vec<TripSummary>> {
        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.list_trip_summaries(&owner_id, filter.as_ref()))
            .await
    }

    /// Sets a trip's status.
    ///
    /// Under the strict policy only hold, resume, complete and restart moves
    /// are accepted; anything else fails with `InvalidTransition` and leaves
    /// the trip unchanged. Step statuses are never affected.
    pub async fn set_trip_status(
        &self,
        session: &Session,
        trip_id: u64,
        status: TripStatus,
    ) -> Result<Trip> {
        let _guard = self.begin(OperationKey::TripStatus { trip_id })?;
        debug!("Setting trip {trip_id} status to {status}");

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.set_trip_status(&owner_id, trip_id, status))
            .await
    }

    /// Applies a named status action.
    pub async fn apply_trip_action(
        &self,
        session: &Session,
        trip_id: u64,
        action: TripAction,
    ) -> Result<Trip> {
        self.set_trip_status(session, trip_id, action.target()).await
    }

    /// Puts an in-progress trip on hold (`planned`).
    pub async fn hold_trip(&self, session: &Session, trip_id: u64) -> Result<Trip> {
        self.apply_trip_action(session, trip_id, TripAction::Hold)
            .await
    }

    /// Makes a planned trip active again.
    pub async fn resume_trip(&self, session: &Session, trip_id: u64) -> Result<Trip> {
        self.apply_trip_action(session, trip_id, TripAction::Resume)
            .await
    }

    /// Marks a trip completed.
    pub async fn complete_trip(&self, session: &Session, trip_id: u64) -> Result<Trip> {
        self.apply_trip_action(session, trip_id, TripAction::Complete)
            .await
    }

    /// Starts a completed trip over.
    pub async fn restart_trip(&self, session: &Session, trip_id: u64) -> Result<Trip> {
        self.apply_trip_action(session, trip_id, TripAction::Restart)
            .await
    }

    /// Edits a trip's title, description or dates.
    pub async fn update_trip(
        &self,
        session: &Session,
        trip_id: u64,
        request: UpdateTripRequest,
    ) -> Result<Trip> {
        let _guard = self.begin(OperationKey::UpdateTrip { trip_id })?;

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.update_trip(&owner_id, trip_id, request))
            .await
    }

    /// Permanently deletes a trip and its steps.
    ///
    /// `confirmed` must be true. Returns the deleted trip.
    pub async fn delete_trip(&self, session: &Session, trip_id: u64, confirmed: bool) -> Result<Trip> {
        if !confirmed {
            return Err(TripError::invalid_input("confirmed").with_reason(
                "Trip deletion requires explicit confirmation. Set 'confirmed' to true to delete the trip and all of its steps.",
            ));
        }

        let _guard = self.begin(OperationKey::DeleteTrip { trip_id })?;
        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.delete_trip(&owner_id, trip_id))
            .await
    }
}
