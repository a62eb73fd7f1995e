//! High-level trip lifecycle API.
//!
//! [`TripManager`] is the single entry point for every lifecycle operation.
//! Each call takes an explicit [`Session`](crate::models::Session), runs its
//! SQLite work on the blocking pool with a fresh connection, and is guarded
//! against re-entrancy: issuing an operation while the identical one is still
//! in flight fails fast with [`TripError::Busy`](crate::TripError::Busy).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (trip_handlers, │───▶│ (trip_ops,      │───▶│   (via db/)     │
//! │  step_handlers) │    │  step_ops, ...) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   string params          typed requests        one transaction
//! ```
//!
//! - [`builder`]: creates a [`TripManager`] with a database path and rules
//! - [`guard`]: the in-flight operation registry
//! - [`trip_ops`], [`step_ops`], [`place_ops`]: typed operations
//! - [`trip_handlers`], [`step_handlers`]: parameter-based entry points used
//!   by the CLI and MCP server
//!
//! # Example
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use waypoint_core::{
//!     models::{NewStep, NewTrip, Session, TripAction},
//!     TripManagerBuilder,
//! };
//!
//! # async fn example() -> waypoint_core::Result<()> {
//! let manager = TripManagerBuilder::new().build().await?;
//! let session = Session::new("alice")?;
//!
//! let trip = manager
//!     .create_trip(
//!         &session,
//!         NewTrip::new(
//!             "Weekend Trip",
//!             None,
//!             date(2024, 6, 1),
//!             date(2024, 6, 2),
//!             vec![NewStep::new("P1"), NewStep::new("P2")],
//!         ),
//!     )
//!     .await?;
//!
//! manager.mark_step_visited(&session, trip.steps[0].id).await?;
//! manager.apply_trip_action(&session, trip.id, TripAction::Complete).await?;
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    config::LifecycleConfig,
    db::Database,
    error::{Result, TripError},
};

pub mod builder;
pub mod guard;
pub mod place_ops;
pub mod step_handlers;
pub mod step_ops;
pub mod trip_handlers;
pub mod trip_ops;


pub use builder::TripManagerBuilder;
pub use guard::{InFlight, InFlightGuard, OperationKey};

/// Main interface for managing trips, steps and places.
///
/// Clones share the database path, rules and in-flight registry.
#[derive(Debug, Clone)]
pub struct TripManager {
    pub(crate) db_path: PathBuf,
    pub(crate) config: LifecycleConfig,
    pub(crate) in_flight: Arc<InFlight>,
}

impl TripManager {
    pub(crate) fn new(db_path: PathBuf, config: LifecycleConfig) -> Self {
        Self {
            db_path,
            config,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Lifecycle rules in effect.
    pub fn config(&self) -> LifecycleConfig {
        self.config
    }

    /// Whether any mutating operation is currently in flight.
    pub fn has_pending_operations(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Register `key` as in flight, failing with `Busy` if it already is.
    pub(crate) fn begin(&self, key: OperationKey) -> Result<InFlightGuard> {
        InFlight::acquire(&self.in_flight, key)
    }

    /// Run `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let config = self.config;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?.with_config(config);
            op(&mut db)
        })
        .await
        .map_err(TripError::join)?
    }
}
