//! Core library for the Waypoint trip planner.
//!
//! Users own trips: itineraries of ordered steps, each visiting a place from
//! a read-only catalog. This crate holds the lifecycle rules for trips and
//! steps, their SQLite persistence, and the markdown formatting shared by the
//! CLI and MCP server.
//!
//! - [`manager`]: [`TripManager`], the async API every caller goes through
//! - [`models`]: trips, steps, places, statuses and validated requests
//! - [`params`]: string-typed inputs shared by the interfaces
//! - [`db`]: the SQLite layer; one transaction per mutation
//! - [`display`]: markdown wrappers for collections and results
//! - [`board`]: [`TripBoard`], cached state for a presentation layer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{
//!     models::Session,
//!     params::{CreateTrip, ListTrips, StepPlan},
//!     TripManagerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = TripManagerBuilder::new()
//!     .with_database_path(Some("trips.db"))
//!     .build()
//!     .await?;
//! let session = Session::new("alice")?;
//!
//! let trip = manager
//!     .create_trip_from_params(
//!         &session,
//!         &CreateTrip {
//!             title: "Weekend Trip".to_string(),
//!             description: None,
//!             start_date: "2024-06-01".to_string(),
//!             end_date: "2024-06-02".to_string(),
//!             steps: vec![StepPlan {
//!                 place_id: "P1".to_string(),
//!                 ..Default::default()
//!             }],
//!         },
//!     )
//!     .await?;
//! println!("{trip}");
//!
//! let groups = manager
//!     .list_trips_grouped(&session, &ListTrips::default())
//!     .await?;
//! println!("{groups}");
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod manager;
pub mod models;
pub mod params;

pub use board::TripBoard;
pub use config::LifecycleConfig;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, PlaceCategories, Steps, TripSummaries,
    UpdateResult,
};
pub use error::{ErrorKind, Result, TripError};
pub use manager::{TripManager, TripManagerBuilder};
pub use models::{
    Place, Session, Step, StepStatus, Trip, TripAction, TripFilter, TripGroups, TripStatus,
    TripSummary,
};
