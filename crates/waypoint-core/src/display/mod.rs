//! Markdown formatting for trips, steps, places and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes are formatted through small wrapper types so the
//! CLI and MCP server print identical text.
//!
//! - [`collections`]: `TripSummaries`, `Steps`, `PlaceCategories` and the
//!   grouped trip listing
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: one-line `OperationStatus` messages
//! - [`datetime`]: `LocalDateTime` and `DateRange`
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use waypoint_core::{
//!     display::{CreateResult, OperationStatus},
//!     models::{Trip, TripStatus},
//! };
//!
//! let trip = Trip {
//!     id: 1,
//!     owner_id: "alice".to_string(),
//!     title: "Weekend Trip".to_string(),
//!     description: None,
//!     start_date: date(2024, 6, 1),
//!     end_date: date(2024, 6, 2),
//!     status: TripStatus::InProgress,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     steps: vec![],
//! };
//!
//! let output = CreateResult::new(trip).to_string();
//! assert!(output.contains("Created trip with ID: 1"));
//!
//! let status = OperationStatus::success("Swapped steps 3 and 4".to_string());
//! assert_eq!(status.to_string(), "Success: Swapped steps 3 and 4\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{PlaceCategories, Steps, TripSummaries};
pub use datetime::{DateRange, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
