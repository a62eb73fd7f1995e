//! Trip CRUD operations, status transitions and listings.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::{
    place_queries::ensure_place_exists,
    step_queries::load_steps,
    utils::parse_column,
};
use crate::{
    error::{DatabaseResultExt, Result, TripError},
    models::{
        requests::clamp_end_date, NewTrip, StepStatus, Trip, TripFilter, TripStatus, TripSummary,
        UpdateTripRequest,
    },
};

const TRIP_COLUMNS: &str =
    "id, owner_id, title, description, start_date, end_date, status, created_at, updated_at";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (owner_id, title, description, start_date, end_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";
const INSERT_STEP_SQL: &str = "INSERT INTO trip_steps (trip_id, place_id, step_num, start_time, end_time, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";
const SELECT_ACTIVE_TRIP_SQL: &str = "SELECT id FROM trips WHERE owner_id = ?1 AND status = 'in_progress' AND id != ?2 ORDER BY start_date LIMIT 1";
const UPDATE_TRIP_STATUS_SQL: &str =
    "UPDATE trips SET status = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET title = ?1, description = ?2, start_date = ?3, end_date = ?4, updated_at = ?5 WHERE id = ?6 AND owner_id = ?7";
const DELETE_TRIP_STEPS_SQL: &str = "DELETE FROM trip_steps WHERE trip_id = ?1";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1 AND owner_id = ?2";

const TRIP_SUMMARY_COLUMNS: &str = "id, owner_id, title, description, start_date, end_date, status, created_at, updated_at, total_steps, visited_steps, skipped_steps";

/// Build a trip (without steps) from the first nine columns of a row.
fn trip_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: row.get::<_, i64>(0)? as u64,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        start_date: parse_column(row, 4)?,
        end_date: parse_column(row, 5)?,
        status: parse_column(row, 6)?,
        created_at: parse_column(row, 7)?,
        updated_at: parse_column(row, 8)?,
        steps: Vec::new(),
    })
}

/// Load a trip of `owner_id` with its steps, or `None` if it is not theirs.
pub(super) fn load_trip(conn: &Connection, owner_id: &str, trip_id: u64) -> Result<Option<Trip>> {
    let trip = conn
        .query_row(
            &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1 AND owner_id = ?2"),
            params![trip_id as i64, owner_id],
            trip_from_row,
        )
        .optional()
        .db_context("Failed to query trip")?;

    match trip {
        Some(mut trip) => {
            trip.steps = load_steps(conn, trip.id)?;
            Ok(Some(trip))
        }
        None => Ok(None),
    }
}

fn require_trip(conn: &Connection, owner_id: &str, trip_id: u64) -> Result<Trip> {
    load_trip(conn, owner_id, trip_id)?.ok_or(TripError::TripNotFound { id: trip_id })
}

/// Fails with `ActiveTripExists` if the owner has an in-progress trip other
/// than `except`.
fn ensure_no_active_trip(conn: &Connection, owner_id: &str, except: u64) -> Result<()> {
    let active: Option<i64> = conn
        .query_row(
            SELECT_ACTIVE_TRIP_SQL,
            params![owner_id, except as i64],
            |row| row.get(0),
        )
        .optional()
        .db_context("Failed to check for an active trip")?;

    match active {
        Some(id) => Err(TripError::ActiveTripExists { id: id as u64 }),
        None => Ok(()),
    }
}

/// Refresh a trip's `updated_at`.
pub(super) fn touch_trip(conn: &Connection, trip_id: u64, now: &str) -> Result<()> {
    conn.execute(
        "UPDATE trips SET updated_at = ?1 WHERE id = ?2",
        params![now, trip_id as i64],
    )
    .db_context("Failed to update trip timestamp")?;
    Ok(())
}

impl super::Database {
    /// Creates a trip and all of its steps in one transaction.
    ///
    /// The trip starts `in_progress`; the first step starts `in_progress` and
    /// the rest `pending`. The request is validated before the transaction is
    /// opened, so a rejected request writes nothing.
    pub fn create_trip(&mut self, owner_id: &str, trip: NewTrip) -> Result<Trip> {
        let trip = trip.validate()?;

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        if self.config.single_active_trip {
            ensure_no_active_trip(&tx, owner_id, 0)?;
        }
        for step in &trip.steps {
            ensure_place_exists(&tx, &step.place_id)?;
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_TRIP_SQL,
            params![
                owner_id,
                &trip.title,
                &trip.description,
                trip.start_date.to_string(),
                trip.end_date.to_string(),
                TripStatus::InProgress.as_str(),
                &now,
            ],
        )
        .db_context("Failed to insert trip")?;

        let trip_id = tx.last_insert_rowid() as u64;

        for (index, step) in trip.steps.iter().enumerate() {
            let status = if index == 0 {
                StepStatus::InProgress
            } else {
                StepStatus::Pending
            };
            tx.execute(
                INSERT_STEP_SQL,
                params![
                    trip_id as i64,
                    &step.place_id,
                    index as i64 + 1,
                    step.start_time.map(|t| t.to_string()),
                    step.end_time.map(|t| t.to_string()),
                    status.as_str(),
                    &now,
                ],
            )
            .db_context("Failed to insert step")?;
        }

        let created = require_trip(&tx, owner_id, trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Created trip {trip_id} '{}' with {} steps for {owner_id}",
            created.title,
            created.steps.len()
        );
        Ok(created)
    }

    /// Retrieves a trip with its steps by ID.
    pub fn get_trip(&self, owner_id: &str, trip_id: u64) -> Result<Option<Trip>> {
        load_trip(&self.connection, owner_id, trip_id)
    }

    /// Lists the owner's trips ordered by start date, each with its steps.
    pub fn list_trips(&self, owner_id: &str, filter: Option<&TripFilter>) -> Result<Vec<Trip>> {
        let (query, params_vec) = filtered_query(
            &format!("SELECT {TRIP_COLUMNS} FROM trips"),
            owner_id,
            filter,
        );

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut trips = stmt
            .query_map(&params_refs[..], trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trips")?;

        // Eagerly load steps for each trip
        for trip in &mut trips {
            trip.steps = load_steps(&self.connection, trip.id)?;
        }

        Ok(trips)
    }

    /// Lists compact summaries of the owner's trips with step counts.
    pub fn list_trip_summaries(
        &self,
        owner_id: &str,
        filter: Option<&TripFilter>,
    ) -> Result<Vec<TripSummary>> {
        let (query, params_vec) = filtered_query(
            &format!("SELECT {TRIP_SUMMARY_COLUMNS} FROM trip_summaries"),
            owner_id,
            filter,
        );

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                let trip = trip_from_row(row)?;
                let total: i64 = row.get(9)?;
                let visited: i64 = row.get(10)?;
                let skipped: i64 = row.get(11)?;
                Ok(TripSummary::from_trip(
                    trip,
                    total as u32,
                    visited as u32,
                    skipped as u32,
                ))
            })
            .db_context("Failed to query trip summaries")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trip summaries")?;

        Ok(summaries)
    }

    /// Moves a trip to `to`, checking the transition against the configured
    /// policy. Setting the current status again changes nothing. Step
    /// statuses are never touched.
    pub fn set_trip_status(&mut self, owner_id: &str, trip_id: u64, to: TripStatus) -> Result<Trip> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let trip = require_trip(&tx, owner_id, trip_id)?;
        let from = trip.status;

        if from == to {
            debug!("Trip {trip_id} is already {to}");
            return Ok(trip);
        }

        if !from.can_transition_to(to, self.config.transition_policy) {
            return Err(TripError::InvalidTransition { from, to });
        }

        if to == TripStatus::InProgress && self.config.single_active_trip {
            ensure_no_active_trip(&tx, owner_id, trip_id)?;
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_TRIP_STATUS_SQL,
            params![to.as_str(), &now, trip_id as i64, owner_id],
        )
        .db_context("Failed to update trip status")?;

        let updated = require_trip(&tx, owner_id, trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Trip {trip_id} moved from {from} to {to}");
        Ok(updated)
    }

    /// Edits a trip's title, description or dates. An end date before the
    /// start date is raised to the start date.
    pub fn update_trip(
        &mut self,
        owner_id: &str,
        trip_id: u64,
        request: UpdateTripRequest,
    ) -> Result<Trip> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current = require_trip(&tx, owner_id, trip_id)?;
        if request.is_empty() {
            return Ok(current);
        }

        let title = request.title.unwrap_or(current.title);
        if title.trim().is_empty() {
            return Err(TripError::invalid_input("title").with_reason("Trip title cannot be empty"));
        }
        let description = match request.description {
            Some(d) if d.trim().is_empty() => None,
            Some(d) => Some(d),
            None => current.description,
        };
        let start_date = request.start_date.unwrap_or(current.start_date);
        let end_date = clamp_end_date(start_date, request.end_date.unwrap_or(current.end_date));

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_TRIP_SQL,
            params![
                &title,
                &description,
                start_date.to_string(),
                end_date.to_string(),
                &now,
                trip_id as i64,
                owner_id,
            ],
        )
        .db_context("Failed to update trip")?;

        let updated = require_trip(&tx, owner_id, trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Permanently deletes a trip and all of its steps.
    ///
    /// Returns the trip as it was before deletion.
    pub fn delete_trip(&mut self, owner_id: &str, trip_id: u64) -> Result<Trip> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let trip = require_trip(&tx, owner_id, trip_id)?;

        // The foreign key cascades, but older files may predate it
        tx.execute(DELETE_TRIP_STEPS_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip steps")?;

        tx.execute(DELETE_TRIP_SQL, params![trip_id as i64, owner_id])
            .db_context("Failed to delete trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Deleted trip {trip_id} '{}'", trip.title);
        Ok(trip)
    }
}

/// Append owner and filter conditions plus start-date ordering to `base`.
fn filtered_query(
    base: &str,
    owner_id: &str,
    filter: Option<&TripFilter>,
) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut conditions = vec!["owner_id = ?"];
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(owner_id.to_string())];

    if let Some(f) = filter {
        if let Some(status) = f.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(ref title) = f.title_contains {
            conditions.push("instr(lower(title), lower(?)) > 0");
            params_vec.push(Box::new(title.clone()));
        }
    }

    let query = format!(
        "{base} WHERE {} ORDER BY start_date ASC, id ASC",
        conditions.join(" AND ")
    );
    (query, params_vec)
}
