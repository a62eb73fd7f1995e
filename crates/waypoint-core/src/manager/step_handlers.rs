//! Parameter-based step and place entry points used by the CLI and MCP
//! server.

use super::TripManager;
use crate::{
    display::PlaceCategories,
    error::{Result, TripError},
    models::{NewStep, Place, Session, Step, UpdateStepRequest},
    params::{AddPlace, AddStep, Id, ListPlaces, SetStepStatus, SwapSteps, UpdateStep},
};

impl TripManager {
    /// Handle showing a single step.
    pub async fn show_step(&self, session: &Session, params: &Id) -> Result<Step> {
        self.require_step(session, params.id).await
    }

    /// Handle appending a step to a trip.
    pub async fn add_step_from_params(&self, session: &Session, params: &AddStep) -> Result<Step> {
        let step = NewStep::try_from(params.step.clone())?;
        self.add_step(session, params.trip_id, step).await
    }

    /// Handle setting a step status given by name.
    pub async fn set_step_status_from_params(
        &self,
        session: &Session,
        params: &SetStepStatus,
    ) -> Result<Step> {
        let status = params.validate()?;
        self.set_step_status(session, params.id, status).await
    }

    /// Handle editing a step's place or times.
    pub async fn update_step_from_params(
        &self,
        session: &Session,
        params: &UpdateStep,
    ) -> Result<Step> {
        let request = UpdateStepRequest::try_from(params.clone())?;
        self.update_step(session, params.id, request).await
    }

    /// Handle swapping two steps. Returns both steps after the swap.
    pub async fn swap_steps_from_params(
        &self,
        session: &Session,
        params: &SwapSteps,
    ) -> Result<(Step, Step)> {
        self.swap_steps(session, params.step1_id, params.step2_id)
            .await?;

        let first = self.require_step(session, params.step1_id).await?;
        let second = self.require_step(session, params.step2_id).await?;
        Ok((first, second))
    }

    /// Handle removing a step.
    pub async fn remove_step_from_params(&self, session: &Session, params: &Id) -> Result<Step> {
        self.remove_step(session, params.id).await
    }

    /// Handle adding or replacing a catalog place.
    pub async fn add_place_from_params(&self, params: &AddPlace) -> Result<Place> {
        let place = Place::try_from(params.clone())?;
        self.add_place(place).await
    }

    /// Handle showing a catalog place.
    pub async fn show_place(&self, place_id: &str) -> Result<Place> {
        self.get_place(place_id)
            .await?
            .ok_or_else(|| TripError::PlaceNotFound {
                id: place_id.to_string(),
            })
    }

    /// Handle browsing the catalog by category.
    pub async fn list_places(&self, params: &ListPlaces) -> Result<PlaceCategories> {
        let category = params.category.clone().filter(|c| !c.trim().is_empty());
        let groups = self.list_places_by_category(category).await?;
        Ok(PlaceCategories(groups))
    }
}
