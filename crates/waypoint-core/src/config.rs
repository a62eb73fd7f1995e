//! Lifecycle rules shared by the manager and the database layer.

use serde::{Deserialize, Serialize};

use crate::models::TransitionPolicy;

/// Rules applied to trip status changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Which trip status transitions are accepted
    pub transition_policy: TransitionPolicy,

    /// Reject creating or resuming a trip while the owner already has one in
    /// progress
    pub single_active_trip: bool,
}

impl LifecycleConfig {
    /// Accept any trip status change.
    pub fn relaxed(mut self) -> Self {
        self.transition_policy = TransitionPolicy::Relaxed;
        self
    }

    /// Allow at most one in-progress trip per owner.
    pub fn single_active_trip(mut self, enabled: bool) -> Self {
        self.single_active_trip = enabled;
        self
    }
}
