//! Parameter-based trip entry points used by the CLI and MCP server.

use super::TripManager;
use crate::{
    display::TripSummaries,
    error::Result,
    models::{NewTrip, Session, Trip, TripAction, TripFilter, TripGroups, UpdateTripRequest},
    params::{CreateTrip, DeleteTrip, Id, ListTrips, SetTripStatus, UpdateTrip},
};

impl TripManager {
    /// Handle creating a trip from string parameters.
    ///
    /// Dates and times are parsed and the request validated before anything
    /// is written.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use waypoint_core::{models::Session, params::{CreateTrip, StepPlan}, TripManagerBuilder};
    /// # async {
    /// let manager = TripManagerBuilder::new().build().await?;
    /// let session = Session::new("alice")?;
    /// let params = CreateTrip {
    ///     title: "Weekend Trip".to_string(),
    ///     description: None,
    ///     start_date: "2024-06-01".to_string(),
    ///     end_date: "2024-06-02".to_string(),
    ///     steps: vec![StepPlan { place_id: "P1".to_string(), ..Default::default() }],
    /// };
    /// let trip = manager.create_trip_from_params(&session, &params).await?;
    /// # Result::<(), waypoint_core::TripError>::Ok(())
    /// # };
    /// ```
    pub async fn create_trip_from_params(
        &self,
        session: &Session,
        params: &CreateTrip,
    ) -> Result<Trip> {
        let trip = NewTrip::try_from(params.clone())?;
        self.create_trip(session, trip).await
    }

    /// Handle listing trips grouped by status.
    pub async fn list_trips_grouped(
        &self,
        session: &Session,
        params: &ListTrips,
    ) -> Result<TripGroups> {
        let filter = TripFilter::try_from(params)?;
        let trips = self.list_trips(session, Some(filter)).await?;
        Ok(TripGroups::from_trips(trips))
    }

    /// Handle listing trip summaries with step progress.
    pub async fn list_trips_summary(
        &self,
        session: &Session,
        params: &ListTrips,
    ) -> Result<TripSummaries> {
        let filter = TripFilter::try_from(params)?;
        let summaries = self.list_trip_summaries(session, Some(filter)).await?;
        Ok(TripSummaries(summaries))
    }

    /// Handle showing a trip with all of its steps.
    pub async fn show_trip(&self, session: &Session, params: &Id) -> Result<Trip> {
        self.require_trip(session, params.id).await
    }

    /// Handle setting a trip status given by name.
    pub async fn set_trip_status_from_params(
        &self,
        session: &Session,
        params: &SetTripStatus,
    ) -> Result<Trip> {
        let status = params.validate()?;
        self.set_trip_status(session, params.id, status).await
    }

    /// Handle a named trip action (hold, resume, complete, restart).
    pub async fn trip_action(
        &self,
        session: &Session,
        params: &Id,
        action: TripAction,
    ) -> Result<Trip> {
        self.apply_trip_action(session, params.id, action).await
    }

    /// Handle editing a trip's details.
    pub async fn update_trip_from_params(
        &self,
        session: &Session,
        params: &UpdateTrip,
    ) -> Result<Trip> {
        let request = UpdateTripRequest::try_from(params.clone())?;
        self.update_trip(session, params.id, request).await
    }

    /// Handle permanently deleting a trip with confirmation.
    ///
    /// # Errors
    ///
    /// Returns `TripError::InvalidInput` if `confirmed` is false
    /// Returns `TripError::TripNotFound` if the user has no such trip
    pub async fn delete_trip_from_params(
        &self,
        session: &Session,
        params: &DeleteTrip,
    ) -> Result<Trip> {
        self.delete_trip(session, params.id, params.confirmed).await
    }
}
