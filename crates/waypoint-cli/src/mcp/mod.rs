//! MCP server implementation for Waypoint
//!
//! Exposes the trip lifecycle operations as MCP tools over stdio. The server
//! is bound to the session given on the command line; every tool acts on that
//! user's trips and returns markdown text.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use waypoint_core::{
    models::{Session, TripAction},
    TripManager,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddPlace, AddStep, CreateTrip, DeleteTrip, Id, ListPlaces, ListTrips, McpResult, PlaceId,
    SetStepStatus, SetTripStatus, SwapSteps, UpdateStep, UpdateTrip,
};

/// MCP server for Waypoint
#[derive(Clone)]
pub struct WaypointMcpServer {
    manager: TripManager,
    session: Session,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    pub fn new(manager: TripManager, session: Session) -> Self {
        Self {
            manager,
            session,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.manager.clone(), self.session.clone())
    }

    #[tool(
        name = "create_trip",
        description = "Create a trip from an ordered list of places. Requires title, start_date and end_date (YYYY-MM-DD) and at least one step with a catalog place_id; steps may carry start_time/end_time (RFC 3339). The trip starts in progress with its first step in progress and the rest pending. Returns the new trip ID."
    )]
    async fn create_trip(&self, params: Parameters<CreateTrip>) -> McpResult {
        self.handlers().create_trip(params).await
    }

    #[tool(
        name = "list_trips",
        description = "List the user's trips with visited/total step counts. Optionally filter by status ('planned', 'in_progress', 'completed') or by a case-insensitive title fragment."
    )]
    async fn list_trips(&self, params: Parameters<ListTrips>) -> McpResult {
        self.handlers().list_trips(params).await
    }

    #[tool(
        name = "show_trip",
        description = "Show a trip with its dates, status and every step in order, including each step's place details and status."
    )]
    async fn show_trip(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_trip(params).await
    }

    #[tool(
        name = "set_trip_status",
        description = "Set a trip's status to 'planned', 'in_progress' or 'completed'. Allowed changes: in_progress -> planned (hold), planned -> in_progress (resume), any -> completed, completed -> in_progress (restart). Step statuses are not changed."
    )]
    async fn set_trip_status(&self, params: Parameters<SetTripStatus>) -> McpResult {
        self.handlers().set_trip_status(params).await
    }

    #[tool(
        name = "hold_trip",
        description = "Put an in-progress trip on hold (status becomes 'planned')."
    )]
    async fn hold_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().trip_action(&params, TripAction::Hold).await
    }

    #[tool(
        name = "resume_trip",
        description = "Make a planned trip active again (status becomes 'in_progress')."
    )]
    async fn resume_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().trip_action(&params, TripAction::Resume).await
    }

    #[tool(
        name = "complete_trip",
        description = "Mark a trip completed. Steps keep their statuses."
    )]
    async fn complete_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers()
            .trip_action(&params, TripAction::Complete)
            .await
    }

    #[tool(
        name = "restart_trip",
        description = "Start a completed trip over (status becomes 'in_progress')."
    )]
    async fn restart_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers()
            .trip_action(&params, TripAction::Restart)
            .await
    }

    #[tool(
        name = "update_trip",
        description = "Edit a trip's title, description, start_date or end_date. Omitted fields are unchanged; an end date before the start date is raised to the start date."
    )]
    async fn update_trip(&self, params: Parameters<UpdateTrip>) -> McpResult {
        self.handlers().update_trip(params).await
    }

    #[tool(
        name = "delete_trip",
        description = "Permanently delete a trip and all of its steps. Requires confirmed=true. This cannot be undone."
    )]
    async fn delete_trip(&self, params: Parameters<DeleteTrip>) -> McpResult {
        self.handlers().delete_trip(params).await
    }

    #[tool(
        name = "add_step",
        description = "Append a step for a catalog place to the end of a trip. The new step is pending. Optional start_time/end_time (RFC 3339)."
    )]
    async fn add_step(&self, params: Parameters<AddStep>) -> McpResult {
        self.handlers().add_step(params).await
    }

    #[tool(
        name = "show_step",
        description = "Show one step with its ordinal, status, times and place details."
    )]
    async fn show_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_step(params).await
    }

    #[tool(
        name = "set_step_status",
        description = "Set a step's status to 'pending', 'in_progress', 'visited' or 'skipped'. Only one step per trip may be in progress; visiting a step does not start the next one."
    )]
    async fn set_step_status(&self, params: Parameters<SetStepStatus>) -> McpResult {
        self.handlers().set_step_status(params).await
    }

    #[tool(
        name = "update_step",
        description = "Change a step's place or its start/end times. Status and order are unchanged."
    )]
    async fn update_step(&self, params: Parameters<UpdateStep>) -> McpResult {
        self.handlers().update_step(params).await
    }

    #[tool(
        name = "swap_steps",
        description = "Swap the order of two steps of the same trip. Statuses and places stay with their steps."
    )]
    async fn swap_steps(&self, params: Parameters<SwapSteps>) -> McpResult {
        self.handlers().swap_steps(params).await
    }

    #[tool(
        name = "remove_step",
        description = "Remove a step from its trip. Later steps move up one position."
    )]
    async fn remove_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_step(params).await
    }

    #[tool(
        name = "add_place",
        description = "Add a place to the catalog, or replace the place with the same id. Requires id and name; rating must be between 0 and 5."
    )]
    async fn add_place(&self, params: Parameters<AddPlace>) -> McpResult {
        self.handlers().add_place(params).await
    }

    #[tool(
        name = "show_place",
        description = "Show a catalog place by id."
    )]
    async fn show_place(&self, params: Parameters<PlaceId>) -> McpResult {
        self.handlers().show_place(params).await
    }

    #[tool(
        name = "list_places",
        description = "List catalog places grouped by category, largest category first. Optionally restrict to one category."
    )]
    async fn list_places(&self, params: Parameters<ListPlaces>) -> McpResult {
        self.handlers().list_places(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Waypoint manages trips: ordered visits to places from a catalog.

## Core Concepts
- **Trips** have a title, start and end dates, and a status: in_progress, planned (on hold) or completed
- **Steps** are the stops of a trip, numbered from 1, each visiting one catalog place. Status: pending, in_progress, visited or skipped
- **Places** live in a shared catalog; browse with `list_places`

## Workflow
1. Find places with `list_places`, add missing ones with `add_place`
2. Create a trip with `create_trip`; the first step starts in progress
3. While travelling, mark steps with `set_step_status` (visited/skipped) and start the next one explicitly
4. Reorder with `swap_steps`, drop stops with `remove_step`
5. Finish with `complete_trip`, or pause with `hold_trip` and `resume_trip`

## Rules
- At most one step per trip is in progress
- Completed trips can only be restarted, not put on hold
- Deleting a trip requires confirmed=true"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!(
        "Starting Waypoint MCP server on stdio for {}",
        server.session.owner_id()
    );
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use waypoint_core::TripManagerBuilder;

    use super::*;

    #[tokio::test]
    async fn test_all_tools_registered() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = TripManagerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("test.db")))
            .build()
            .await
            .expect("Failed to create manager");
        let server = WaypointMcpServer::new(manager, Session::new("alice").unwrap());

        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(names.len(), 19);
        for expected in ["create_trip", "hold_trip", "swap_steps", "list_places"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }
}
