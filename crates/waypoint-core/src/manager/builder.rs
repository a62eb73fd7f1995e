//! Builder for creating and configuring TripManager instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::TripManager;
use crate::{
    config::LifecycleConfig,
    db::Database,
    error::{Result, TripError},
    models::TransitionPolicy,
};

/// Builder for creating and configuring TripManager instances.
#[derive(Debug, Clone, Default)]
pub struct TripManagerBuilder {
    database_path: Option<PathBuf>,
    config: LifecycleConfig,
}

impl TripManagerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces all lifecycle rules.
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets which trip status transitions are accepted.
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.config.transition_policy = policy;
        self
    }

    /// Allow at most one in-progress trip per owner.
    pub fn with_single_active_trip(mut self, enabled: bool) -> Self {
        self.config.single_active_trip = enabled;
        self
    }

    /// Builds the configured manager instance.
    ///
    /// # Errors
    ///
    /// Returns `TripError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `TripError::Database` if database initialization fails
    pub async fn build(self) -> Result<TripManager> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TripError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(TripError::join)??;

        debug!(
            "Trip manager ready at {} ({:?})",
            db_path.display(),
            self.config
        );
        Ok(TripManager::new(db_path, self.config))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| TripError::XdgDirectory(e.to_string()))
    }
}
