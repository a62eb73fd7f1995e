//! Data models for trips, steps and places.
//!
//! Display implementations for these models live in
//! [`crate::display::models`]; they render markdown:
//!
//! - **Trip**: header with ID and title, status and dates, optional
//!   description, then the ordered step list with status icons
//! - **Step**: place name, ordinal, times and the place's details
//! - **TripSummary**: one compact line per trip with visited/total progress
//!
//! Request types in [`requests`] are the validated forms of the string-typed
//! [`crate::params`].
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use waypoint_core::models::{Step, StepStatus, Trip, TripStatus};
//!
//! let now = Timestamp::now();
//! let trip = Trip {
//!     id: 1,
//!     owner_id: "alice".to_string(),
//!     title: "Weekend Trip".to_string(),
//!     description: None,
//!     start_date: date(2024, 6, 1),
//!     end_date: date(2024, 6, 2),
//!     status: TripStatus::InProgress,
//!     created_at: now,
//!     updated_at: now,
//!     steps: vec![Step {
//!         id: 10,
//!         trip_id: 1,
//!         step_num: 1,
//!         place_id: "P1".to_string(),
//!         place: None,
//!         start_time: None,
//!         end_time: None,
//!         status: StepStatus::InProgress,
//!         created_at: now,
//!         updated_at: now,
//!     }],
//! };
//! assert_eq!(trip.active_step().map(|s| s.id), Some(10));
//! println!("{trip}");
//! ```

pub mod filters;
pub mod groups;
pub mod place;
pub mod requests;
pub mod selection;
pub mod session;
pub mod status;
pub mod step;
pub mod summary;
pub mod trip;


pub use filters::TripFilter;
pub use groups::TripGroups;
pub use place::{CategoryGroup, Place};
pub use requests::{NewStep, NewTrip, UpdateStepRequest, UpdateTripRequest};
pub use selection::SwapSelection;
pub use session::Session;
pub use status::{StepStatus, TransitionPolicy, TripAction, TripStatus};
pub use step::Step;
pub use summary::TripSummary;
pub use trip::Trip;
