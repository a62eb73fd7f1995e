//! In-flight operation registry.
//!
//! A mutating operation registers a key for its target before touching the
//! store and releases it when it finishes, whether it succeeded or not. A
//! second operation with an equal key is rejected with
//! [`TripError::Busy`] while the first is running; callers treat that as a
//! no-op, like a repeated tap on a button that is already working.

use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;

use crate::error::{Result, TripError};

/// Identifies one mutating operation on one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKey {
    CreateTrip { owner_id: String },
    TripStatus { trip_id: u64 },
    UpdateTrip { trip_id: u64 },
    DeleteTrip { trip_id: u64 },
    AddStep { trip_id: u64 },
    StepStatus { step_id: u64 },
    UpdateStep { step_id: u64 },
    RemoveStep { step_id: u64 },
    SwapSteps { first: u64, second: u64 },
    SavePlace { place_id: String },
}

impl OperationKey {
    /// Key for swapping two steps; the pair is unordered.
    ///
    /// ```rust
    /// use waypoint_core::manager::OperationKey;
    ///
    /// assert_eq!(OperationKey::swap(4, 2), OperationKey::swap(2, 4));
    /// ```
    pub fn swap(a: u64, b: u64) -> Self {
        Self::SwapSteps {
            first: a.min(b),
            second: a.max(b),
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTrip { owner_id } => write!(f, "create trip for {owner_id}"),
            Self::TripStatus { trip_id } => write!(f, "change status of trip {trip_id}"),
            Self::UpdateTrip { trip_id } => write!(f, "edit trip {trip_id}"),
            Self::DeleteTrip { trip_id } => write!(f, "delete trip {trip_id}"),
            Self::AddStep { trip_id } => write!(f, "add step to trip {trip_id}"),
            Self::StepStatus { step_id } => write!(f, "change status of step {step_id}"),
            Self::UpdateStep { step_id } => write!(f, "edit step {step_id}"),
            Self::RemoveStep { step_id } => write!(f, "remove step {step_id}"),
            Self::SwapSteps { first, second } => write!(f, "swap steps {first} and {second}"),
            Self::SavePlace { place_id } => write!(f, "save place {place_id}"),
        }
    }
}

/// Set of operation keys currently in flight.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: Mutex<HashSet<OperationKey>>,
}

impl InFlight {
    /// Registers `key`, returning a guard that releases it on drop.
    ///
    /// # Errors
    ///
    /// Returns `TripError::Busy` if an equal key is already registered.
    pub fn acquire(registry: &Arc<Self>, key: OperationKey) -> Result<InFlightGuard> {
        let mut keys = registry.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            debug!("Rejecting duplicate operation: {key}");
            return Err(TripError::Busy {
                operation: key.to_string(),
            });
        }

        Ok(InFlightGuard {
            registry: Arc::clone(registry),
            key,
        })
    }

    /// Whether `key` is currently registered.
    pub fn contains(&self, key: &OperationKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Whether nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

/// Releases its key from the registry when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlight>,
    key: OperationKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
