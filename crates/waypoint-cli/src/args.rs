use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlaceCommands, StepCommands, TripCommands};

/// Plan trips as ordered stops at places, and track them as you travel
///
/// Waypoint keeps trips, their steps and a catalog of places in a local
/// SQLite database. Run without a subcommand to list your trips, or start the
/// MCP (Model Context Protocol) server with `serve` to let an assistant
/// manage them.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User whose trips are shown and changed
    #[arg(long, global = true, default_value = "local")]
    pub user: String,

    /// Allow any trip status change, not only hold/resume/complete/restart
    #[arg(long, global = true)]
    pub relaxed_transitions: bool,

    /// Allow at most one trip in progress per user
    #[arg(long, global = true)]
    pub single_active_trip: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage the steps of a trip
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage the place catalog
    #[command(alias = "p")]
    Place {
        #[command(subcommand)]
        command: PlaceCommands,
    },
    /// Start the MCP server
    Serve,
}
