//! MCP tool handlers implementation

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use waypoint_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    models::{Session, TripAction},
    params as core, TripManager,
};

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types.
///
/// Passes deserialization and schema generation straight through to the
/// wrapped type, so the core params stay free of rmcp types.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateTrip = McpParams<core::CreateTrip>;
pub type ListTrips = McpParams<core::ListTrips>;
pub type SetTripStatus = McpParams<core::SetTripStatus>;
pub type UpdateTrip = McpParams<core::UpdateTrip>;
pub type DeleteTrip = McpParams<core::DeleteTrip>;
pub type AddStep = McpParams<core::AddStep>;
pub type SetStepStatus = McpParams<core::SetStepStatus>;
pub type UpdateStep = McpParams<core::UpdateStep>;
pub type SwapSteps = McpParams<core::SwapSteps>;
pub type AddPlace = McpParams<core::AddPlace>;
pub type PlaceId = McpParams<core::PlaceId>;
pub type ListPlaces = McpParams<core::ListPlaces>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server, bound to one session.
pub struct McpHandlers {
    manager: TripManager,
    session: Session,
}

impl McpHandlers {
    pub fn new(manager: TripManager, session: Session) -> Self {
        Self { manager, session }
    }

    pub async fn create_trip(&self, Parameters(params): Parameters<CreateTrip>) -> McpResult {
        debug!("create_trip: {params:?}");

        let trip = self
            .manager
            .create_trip_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create trip", &e))?;

        text(CreateResult::new(trip))
    }

    pub async fn list_trips(&self, Parameters(params): Parameters<ListTrips>) -> McpResult {
        debug!("list_trips: {params:?}");

        let summaries = self
            .manager
            .list_trips_summary(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list trips", &e))?;

        let title = match params.as_ref().status.as_deref() {
            Some(status) => format!("Trips ({status})"),
            None => "Trips".to_string(),
        };
        text(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_trip: {params:?}");

        let trip = self
            .manager
            .show_trip(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get trip", &e))?;

        text(trip)
    }

    pub async fn set_trip_status(
        &self,
        Parameters(params): Parameters<SetTripStatus>,
    ) -> McpResult {
        debug!("set_trip_status: {params:?}");

        let trip = self
            .manager
            .set_trip_status_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set trip status", &e))?;

        let changes = vec![format!("Status: {}", trip.status.label())];
        text(UpdateResult::with_changes(trip, changes))
    }

    pub async fn trip_action(&self, params: &Id, action: TripAction) -> McpResult {
        debug!("trip_action {action:?}: {params:?}");

        let trip = self
            .manager
            .trip_action(&self.session, params.as_ref(), action)
            .await
            .map_err(|e| {
                to_mcp_error(
                    &format!("Failed to {} trip", action_name(action)),
                    &e,
                )
            })?;

        text(OperationStatus::success(format!(
            "{} '{}' (ID: {}). Status: {}",
            action.verb(),
            trip.title,
            trip.id,
            trip.status.label()
        )))
    }

    pub async fn update_trip(&self, Parameters(params): Parameters<UpdateTrip>) -> McpResult {
        debug!("update_trip: {params:?}");

        let trip = self
            .manager
            .update_trip_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update trip", &e))?;

        text(UpdateResult::new(trip))
    }

    pub async fn delete_trip(&self, Parameters(params): Parameters<DeleteTrip>) -> McpResult {
        debug!("delete_trip: {params:?}");

        let trip = self
            .manager
            .delete_trip_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete trip", &e))?;

        text(DeleteResult::new(trip))
    }

    pub async fn add_step(&self, Parameters(params): Parameters<AddStep>) -> McpResult {
        debug!("add_step: {params:?}");

        let step = self
            .manager
            .add_step_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;

        text(CreateResult::new(step))
    }

    pub async fn show_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_step: {params:?}");

        let step = self
            .manager
            .show_step(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get step", &e))?;

        text(step)
    }

    pub async fn set_step_status(
        &self,
        Parameters(params): Parameters<SetStepStatus>,
    ) -> McpResult {
        debug!("set_step_status: {params:?}");

        let step = self
            .manager
            .set_step_status_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set step status", &e))?;

        text(OperationStatus::success(format!(
            "Step {} '{}' (ID: {}) is now {}",
            step.step_num,
            step.name(),
            step.id,
            step.status.with_icon()
        )))
    }

    pub async fn update_step(&self, Parameters(params): Parameters<UpdateStep>) -> McpResult {
        debug!("update_step: {params:?}");

        let step = self
            .manager
            .update_step_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update step", &e))?;

        text(UpdateResult::new(step))
    }

    pub async fn swap_steps(&self, Parameters(params): Parameters<SwapSteps>) -> McpResult {
        debug!("swap_steps: {params:?}");

        let (first, second) = self
            .manager
            .swap_steps_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to swap steps", &e))?;

        text(OperationStatus::success(format!(
            "Swapped steps {} and {}: '{}' is now step {}, '{}' is now step {}",
            first.id,
            second.id,
            first.name(),
            first.step_num,
            second.name(),
            second.step_num
        )))
    }

    pub async fn remove_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_step: {params:?}");

        let step = self
            .manager
            .remove_step_from_params(&self.session, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove step", &e))?;

        text(DeleteResult::new(step))
    }

    pub async fn add_place(&self, Parameters(params): Parameters<AddPlace>) -> McpResult {
        debug!("add_place: {params:?}");

        let place = self
            .manager
            .add_place_from_params(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to save place", &e))?;

        text(CreateResult::new(place))
    }

    pub async fn show_place(&self, Parameters(params): Parameters<PlaceId>) -> McpResult {
        debug!("show_place: {params:?}");

        let place = self
            .manager
            .show_place(&params.as_ref().id)
            .await
            .map_err(|e| to_mcp_error("Failed to get place", &e))?;

        text(place)
    }

    pub async fn list_places(&self, Parameters(params): Parameters<ListPlaces>) -> McpResult {
        debug!("list_places: {params:?}");

        let categories = self
            .manager
            .list_places(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list places", &e))?;

        text(format!(
            "# Places ({})\n\n{categories}",
            categories.place_count()
        ))
    }
}

fn action_name(action: TripAction) -> &'static str {
    match action {
        TripAction::Hold => "hold",
        TripAction::Resume => "resume",
        TripAction::Complete => "complete",
        TripAction::Restart => "restart",
    }
}
