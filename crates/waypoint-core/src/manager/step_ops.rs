//! Step operations for the TripManager.

use log::debug;

use super::{OperationKey, TripManager};
use crate::{
    error::{Result, TripError},
    models::{NewStep, Session, Step, StepStatus, UpdateStepRequest},
};

impl TripManager {
    /// Retrieves a step with its place.
    pub async fn get_step(&self, session: &Session, step_id: u64) -> Result<Option<Step>> {
        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.get_step(&owner_id, step_id)).await
    }

    /// Like [`TripManager::get_step`] but missing steps are an error.
    pub async fn require_step(&self, session: &Session, step_id: u64) -> Result<Step> {
        self.get_step(session, step_id)
            .await?
            .ok_or(TripError::StepNotFound { id: step_id })
    }

    /// Appends a pending step to a trip.
    pub async fn add_step(&self, session: &Session, trip_id: u64, step: NewStep) -> Result<Step> {
        let _guard = self.begin(OperationKey::AddStep { trip_id })?;
        debug!("Adding place {} to trip {trip_id}", step.place_id);

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.add_step(&owner_id, trip_id, &step))
            .await
    }

    /// Sets one step's status without touching its siblings.
    pub async fn set_step_status(
        &self,
        session: &Session,
        step_id: u64,
        status: StepStatus,
    ) -> Result<Step> {
        let _guard = self.begin(OperationKey::StepStatus { step_id })?;
        debug!("Setting step {step_id} status to {status}");

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.set_step_status(&owner_id, step_id, status))
            .await
    }

    /// Marks a step visited. The next step is not started.
    pub async fn mark_step_visited(&self, session: &Session, step_id: u64) -> Result<Step> {
        self.set_step_status(session, step_id, StepStatus::Visited)
            .await
    }

    /// Returns a step to pending.
    pub async fn mark_step_pending(&self, session: &Session, step_id: u64) -> Result<Step> {
        self.set_step_status(session, step_id, StepStatus::Pending)
            .await
    }

    /// Marks a step skipped.
    pub async fn mark_step_skipped(&self, session: &Session, step_id: u64) -> Result<Step> {
        self.set_step_status(session, step_id, StepStatus::Skipped)
            .await
    }

    /// Starts a step. Fails with `StepAlreadyActive` if another step of the
    /// trip is in progress.
    pub async fn start_step(&self, session: &Session, step_id: u64) -> Result<Step> {
        self.set_step_status(session, step_id, StepStatus::InProgress)
            .await
    }

    /// Edits a step's place or times.
    pub async fn update_step(
        &self,
        session: &Session,
        step_id: u64,
        request: UpdateStepRequest,
    ) -> Result<Step> {
        let _guard = self.begin(OperationKey::UpdateStep { step_id })?;

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.update_step(&owner_id, step_id, request))
            .await
    }

    /// Exchanges the ordinals of two steps of the same trip.
    pub async fn swap_steps(&self, session: &Session, step_id1: u64, step_id2: u64) -> Result<()> {
        let _guard = self.begin(OperationKey::swap(step_id1, step_id2))?;
        debug!("Swapping steps {step_id1} and {step_id2}");

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.swap_steps(&owner_id, step_id1, step_id2))
            .await
    }

    /// Removes a step; later steps move up one ordinal. Returns the removed
    /// step.
    pub async fn remove_step(&self, session: &Session, step_id: u64) -> Result<Step> {
        let _guard = self.begin(OperationKey::RemoveStep { step_id })?;

        let owner_id = session.owner_id().to_string();
        self.with_db(move |db| db.remove_step(&owner_id, step_id))
            .await
    }
}
