//! Waypoint CLI Application
//!
//! Command-line interface and MCP server for the waypoint trip planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::{
    models::{Session, TransitionPolicy},
    TripManagerBuilder,
};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        relaxed_transitions,
        single_active_trip,
        command,
    } = Args::parse();

    let policy = if relaxed_transitions {
        TransitionPolicy::Relaxed
    } else {
        TransitionPolicy::Strict
    };

    let manager = TripManagerBuilder::new()
        .with_database_path(database_file)
        .with_transition_policy(policy)
        .with_single_active_trip(single_active_trip)
        .build()
        .await
        .context("Failed to initialize trip manager")?;

    let session = Session::new(user).context("Invalid --user")?;
    let renderer = TerminalRenderer::new(!no_color);

    info!("Waypoint started for {}", session.owner_id());

    match command {
        Some(Trip { command }) => {
            Cli::new(manager, session, renderer)
                .handle_trip_command(command)
                .await
        }
        Some(Step { command }) => {
            Cli::new(manager, session, renderer)
                .handle_step_command(command)
                .await
        }
        Some(Place { command }) => {
            Cli::new(manager, session, renderer)
                .handle_place_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(manager, session))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(manager, session, renderer).list_trips().await,
    }
}
