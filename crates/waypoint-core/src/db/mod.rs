//! Database operations and SQLite management for trips, steps and places.
//!
//! Every query that touches trips or steps is scoped to an owner ID; rows of
//! other owners are reported as missing. Each mutating method runs in a single
//! transaction.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::{
    config::LifecycleConfig,
    error::{DatabaseResultExt, Result},
};

pub mod migrations;
pub mod place_queries;
pub mod step_queries;
pub mod trip_queries;
pub mod utils;

/// How long a write transaction waits for another connection's lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
    config: LifecycleConfig,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        // Writers queue behind each other instead of failing with SQLITE_BUSY.
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self {
            connection,
            config: LifecycleConfig::default(),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Replaces the lifecycle rules applied by status changes.
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Lifecycle rules in effect.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }
}
