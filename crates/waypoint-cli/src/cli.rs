//! Subcommand arguments and their handlers.
//!
//! Each clap argument struct converts into the matching core parameter type
//! with a `From` impl, so clap attributes never leak into the core:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → TripManager
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use waypoint_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    models::{Session, StepStatus, TripAction},
    params::*,
    TripBoard, TripManager,
};

use crate::renderer::TerminalRenderer;

/// Create a new trip
#[derive(Args)]
pub struct CreateTripArgs {
    /// Title of the trip
    pub title: String,
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// Last day of the trip (YYYY-MM-DD); defaults to the first day
    #[arg(long)]
    pub end: Option<String>,
    /// Place to visit, in order; repeat for every stop
    #[arg(short, long = "place", required = true)]
    pub places: Vec<String>,
    /// Optional description of the trip
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            end_date: val.end.unwrap_or_else(|| val.start.clone()),
            start_date: val.start,
            title: val.title,
            description: val.description,
            steps: val
                .places
                .into_iter()
                .map(|place_id| StepPlan {
                    place_id,
                    ..Default::default()
                })
                .collect(),
        }
    }
}

/// List trips
#[derive(Args)]
pub struct ListTripsArgs {
    /// Only trips with this status
    #[arg(short, long, help = "Only trips with this status (planned, in_progress, completed)")]
    pub status: Option<String>,
    /// Only trips whose title contains this text
    #[arg(short, long)]
    pub title: Option<String>,
    /// Show one summary per trip with step counts
    #[arg(long)]
    pub summary: bool,
}

impl From<&ListTripsArgs> for ListTrips {
    fn from(val: &ListTripsArgs) -> Self {
        ListTrips {
            status: val.status.clone(),
            title: val.title.clone(),
        }
    }
}

/// Select a trip or step by ID
#[derive(Args)]
pub struct IdArgs {
    /// Unique identifier
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a trip's details
#[derive(Args)]
pub struct EditTripArgs {
    /// ID of the trip to edit
    pub id: u64,
    #[arg(short, long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description; an empty string clears it")]
    pub description: Option<String>,
    #[arg(long, help = "New first day (YYYY-MM-DD)")]
    pub start: Option<String>,
    #[arg(long, help = "New last day (YYYY-MM-DD)")]
    pub end: Option<String>,
}

impl From<EditTripArgs> for UpdateTrip {
    fn from(val: EditTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            title: val.title,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// Delete a trip permanently
#[derive(Args)]
pub struct DeleteTripArgs {
    /// ID of the trip to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteTripArgs> for DeleteTrip {
    fn from(val: DeleteTripArgs) -> Self {
        DeleteTrip {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List trips grouped by status
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Show a trip with all of its steps
    #[command(alias = "s")]
    Show(IdArgs),
    /// Put an in-progress trip on hold
    Hold(IdArgs),
    /// Make a planned trip active again
    Resume(IdArgs),
    /// Mark a trip completed
    Complete(IdArgs),
    /// Start a completed trip over
    Restart(IdArgs),
    /// Edit a trip's title, description or dates
    #[command(alias = "e")]
    Edit(EditTripArgs),
    /// Delete a trip and its steps permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
}

/// Append a step to a trip
#[derive(Args)]
pub struct AddStepArgs {
    /// ID of the trip to add the step to
    pub trip_id: u64,
    /// Catalog ID of the place to visit
    pub place_id: String,
    #[arg(long, help = "Arrival time (RFC 3339 or YYYY-MM-DDTHH:MM local)")]
    pub start: Option<String>,
    #[arg(long, help = "Departure time (RFC 3339 or YYYY-MM-DDTHH:MM local)")]
    pub end: Option<String>,
}

impl From<AddStepArgs> for AddStep {
    fn from(val: AddStepArgs) -> Self {
        AddStep {
            trip_id: val.trip_id,
            step: StepPlan {
                place_id: val.place_id,
                start_time: val.start,
                end_time: val.end,
            },
        }
    }
}

/// Edit a step's place or times
#[derive(Args)]
pub struct EditStepArgs {
    /// ID of the step to edit
    pub id: u64,
    #[arg(short, long, help = "Catalog ID of the new place")]
    pub place: Option<String>,
    #[arg(long, help = "Arrival time (RFC 3339 or YYYY-MM-DDTHH:MM local)")]
    pub start: Option<String>,
    #[arg(long, help = "Departure time (RFC 3339 or YYYY-MM-DDTHH:MM local)")]
    pub end: Option<String>,
}

impl From<EditStepArgs> for UpdateStep {
    fn from(val: EditStepArgs) -> Self {
        UpdateStep {
            id: val.id,
            place_id: val.place,
            start_time: val.start,
            end_time: val.end,
        }
    }
}

/// Swap the order of two steps of the same trip
#[derive(Args)]
pub struct SwapStepsArgs {
    #[arg(help = "ID of the first step to swap")]
    pub step1_id: u64,
    #[arg(help = "ID of the second step to swap")]
    pub step2_id: u64,
}

impl From<SwapStepsArgs> for SwapSteps {
    fn from(val: SwapStepsArgs) -> Self {
        SwapSteps {
            step1_id: val.step1_id,
            step2_id: val.step2_id,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a step to a trip
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Show one step
    #[command(alias = "s")]
    Show(IdArgs),
    /// Mark a step visited
    #[command(alias = "v")]
    Visit(IdArgs),
    /// Return a step to pending
    Pending(IdArgs),
    /// Mark a step skipped
    Skip(IdArgs),
    /// Start a step
    Start(IdArgs),
    /// Edit a step's place or times
    #[command(alias = "e")]
    Edit(EditStepArgs),
    /// Swap the order of two steps of the same trip
    #[command(alias = "sw")]
    Swap(SwapStepsArgs),
    /// Remove a step; later steps move up
    #[command(aliases = ["rm", "d"])]
    Remove(IdArgs),
}

/// Add or replace a catalog place
#[derive(Args)]
pub struct AddPlaceArgs {
    /// Catalog key of the place
    pub id: String,
    /// Display name
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long, help = "Rating between 0 and 5")]
    pub rating: Option<f64>,
    #[arg(long, help = "Image URL")]
    pub image: Option<String>,
    #[arg(long, help = "External link")]
    pub link: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl From<AddPlaceArgs> for AddPlace {
    fn from(val: AddPlaceArgs) -> Self {
        AddPlace {
            id: val.id,
            name: val.name,
            description: val.description,
            address: val.address,
            city: val.city,
            category: val.category,
            rating: val.rating,
            image: val.image,
            external_link: val.link,
            latitude: val.lat,
            longitude: val.lon,
        }
    }
}

/// Select a place by catalog ID
#[derive(Args)]
pub struct PlaceIdArgs {
    /// Catalog key of the place
    pub id: String,
}

/// Browse the catalog
#[derive(Args)]
pub struct ListPlacesArgs {
    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,
}

impl From<ListPlacesArgs> for ListPlaces {
    fn from(val: ListPlacesArgs) -> Self {
        ListPlaces {
            category: val.category,
        }
    }
}

#[derive(Subcommand)]
pub enum PlaceCommands {
    /// Add or replace a catalog place
    #[command(alias = "a")]
    Add(AddPlaceArgs),
    /// Show one place
    #[command(alias = "s")]
    Show(PlaceIdArgs),
    /// List places grouped by category
    #[command(aliases = ["l", "ls"])]
    List(ListPlacesArgs),
}

/// Runs subcommands against a manager for one user and prints the results.
pub struct Cli {
    manager: TripManager,
    session: Session,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(manager: TripManager, session: Session, renderer: TerminalRenderer) -> Self {
        Self {
            manager,
            session,
            renderer,
        }
    }

    /// Print the user's trips grouped by status.
    pub async fn list_trips(self) -> Result<()> {
        let mut board = TripBoard::new(self.manager, self.session);
        let trips = board.refresh().await.context("Failed to list trips")?;
        self.renderer.render(&trips.to_string())
    }

    pub async fn handle_trip_command(self, command: TripCommands) -> Result<()> {
        let Self {
            manager,
            session,
            renderer,
        } = self;

        let output = match command {
            TripCommands::Create(args) => {
                let trip = manager
                    .create_trip_from_params(&session, &args.into())
                    .await
                    .context("Failed to create trip")?;
                CreateResult::new(trip).to_string()
            }
            TripCommands::List(args) => {
                let params = ListTrips::from(&args);
                if args.summary {
                    manager
                        .list_trips_summary(&session, &params)
                        .await
                        .context("Failed to list trips")?
                        .to_string()
                } else {
                    manager
                        .list_trips_grouped(&session, &params)
                        .await
                        .context("Failed to list trips")?
                        .to_string()
                }
            }
            TripCommands::Show(args) => manager
                .show_trip(&session, &args.into())
                .await
                .context("Failed to show trip")?
                .to_string(),
            TripCommands::Hold(args) => {
                trip_action(&manager, &session, args, TripAction::Hold).await?
            }
            TripCommands::Resume(args) => {
                trip_action(&manager, &session, args, TripAction::Resume).await?
            }
            TripCommands::Complete(args) => {
                trip_action(&manager, &session, args, TripAction::Complete).await?
            }
            TripCommands::Restart(args) => {
                trip_action(&manager, &session, args, TripAction::Restart).await?
            }
            TripCommands::Edit(args) => {
                let params = UpdateTrip::from(args);
                let changes = trip_changes(&params);
                let trip = manager
                    .update_trip_from_params(&session, &params)
                    .await
                    .context("Failed to edit trip")?;
                UpdateResult::with_changes(trip, changes).to_string()
            }
            TripCommands::Delete(args) => {
                let trip = manager
                    .delete_trip_from_params(&session, &args.into())
                    .await
                    .context("Failed to delete trip")?;
                DeleteResult::new(trip).to_string()
            }
        };

        renderer.render(&output)
    }

    pub async fn handle_step_command(self, command: StepCommands) -> Result<()> {
        let Self {
            manager,
            session,
            renderer,
        } = self;

        let output = match command {
            StepCommands::Add(args) => {
                let step = manager
                    .add_step_from_params(&session, &args.into())
                    .await
                    .context("Failed to add step")?;
                CreateResult::new(step).to_string()
            }
            StepCommands::Show(args) => manager
                .show_step(&session, &args.into())
                .await
                .context("Failed to show step")?
                .to_string(),
            StepCommands::Visit(args) => {
                step_status(&manager, &session, args, StepStatus::Visited).await?
            }
            StepCommands::Pending(args) => {
                step_status(&manager, &session, args, StepStatus::Pending).await?
            }
            StepCommands::Skip(args) => {
                step_status(&manager, &session, args, StepStatus::Skipped).await?
            }
            StepCommands::Start(args) => {
                step_status(&manager, &session, args, StepStatus::InProgress).await?
            }
            StepCommands::Edit(args) => {
                let step = manager
                    .update_step_from_params(&session, &args.into())
                    .await
                    .context("Failed to edit step")?;
                UpdateResult::new(step).to_string()
            }
            StepCommands::Swap(args) => {
                let (first, second) = manager
                    .swap_steps_from_params(&session, &args.into())
                    .await
                    .context("Failed to swap steps")?;
                OperationStatus::success(format!(
                    "Swapped steps {} and {}: '{}' is now step {}, '{}' is now step {}",
                    first.id,
                    second.id,
                    first.name(),
                    first.step_num,
                    second.name(),
                    second.step_num
                ))
                .to_string()
            }
            StepCommands::Remove(args) => {
                let step = manager
                    .remove_step_from_params(&session, &args.into())
                    .await
                    .context("Failed to remove step")?;
                DeleteResult::new(step).to_string()
            }
        };

        renderer.render(&output)
    }

    pub async fn handle_place_command(self, command: PlaceCommands) -> Result<()> {
        let output = match command {
            PlaceCommands::Add(args) => {
                let place = self
                    .manager
                    .add_place_from_params(&args.into())
                    .await
                    .context("Failed to save place")?;
                CreateResult::new(place).to_string()
            }
            PlaceCommands::Show(args) => self
                .manager
                .show_place(&args.id)
                .await
                .context("Failed to show place")?
                .to_string(),
            PlaceCommands::List(args) => self
                .manager
                .list_places(&args.into())
                .await
                .context("Failed to list places")?
                .to_string(),
        };

        self.renderer.render(&output)
    }
}

async fn trip_action(
    manager: &TripManager,
    session: &Session,
    args: IdArgs,
    action: TripAction,
) -> Result<String> {
    debug!("Applying {action:?} to trip {}", args.id);
    let trip = manager
        .trip_action(session, &args.into(), action)
        .await
        .with_context(|| format!("Failed to change trip status ({})", action.verb().to_lowercase()))?;

    Ok(OperationStatus::success(format!(
        "{} '{}' (ID: {}). Status: {}",
        action.verb(),
        trip.title,
        trip.id,
        trip.status.label()
    ))
    .to_string())
}

async fn step_status(
    manager: &TripManager,
    session: &Session,
    args: IdArgs,
    status: StepStatus,
) -> Result<String> {
    let step = manager
        .set_step_status_from_params(
            session,
            &SetStepStatus {
                id: args.id,
                status: status.as_str().to_string(),
            },
        )
        .await
        .context("Failed to change step status")?;

    Ok(OperationStatus::success(format!(
        "Step {} '{}' is now {}",
        step.step_num,
        step.name(),
        step.status.with_icon()
    ))
    .to_string())
}

/// Describe the fields an edit will touch.
fn trip_changes(params: &UpdateTrip) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(title) = &params.title {
        changes.push(format!("Title: {title}"));
    }
    if let Some(description) = &params.description {
        if description.trim().is_empty() {
            changes.push("Description: cleared".to_string());
        } else {
            changes.push("Description: updated".to_string());
        }
    }
    if let Some(start) = &params.start_date {
        changes.push(format!("Start date: {start}"));
    }
    if let Some(end) = &params.end_date {
        changes.push(format!("End date: {end}"));
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_default_end_date() {
        let params = CreateTrip::from(CreateTripArgs {
            title: "Lisbon".to_string(),
            start: "2024-06-01".to_string(),
            end: None,
            places: vec!["P1".to_string(), "P2".to_string()],
            description: None,
        });
        assert_eq!(params.end_date, "2024-06-01");
        assert_eq!(params.steps.len(), 2);
        assert_eq!(params.steps[1].place_id, "P2");
    }

    #[test]
    fn test_trip_changes() {
        let changes = trip_changes(&UpdateTrip {
            id: 1,
            title: Some("Porto".to_string()),
            description: Some(String::new()),
            start_date: None,
            end_date: Some("2024-06-04".to_string()),
        });
        assert_eq!(
            changes,
            vec!["Title: Porto", "Description: cleared", "End date: 2024-06-04"]
        );
    }
}
