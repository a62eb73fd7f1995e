//! Step status changes, ordering and editing.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::{
    place_queries::ensure_place_exists,
    trip_queries::{load_trip, touch_trip},
    utils::{parse_column, parse_optional_column, place_from_row},
};
use crate::{
    error::{DatabaseResultExt, Result, TripError},
    models::{requests::check_time_order, NewStep, Step, StepStatus, UpdateStepRequest},
};

const STEP_SELECT: &str = "SELECT s.id, s.trip_id, s.step_num, s.place_id, s.start_time, s.end_time, s.status, s.created_at, s.updated_at, \
    p.id, p.name, p.description, p.address, p.city, p.category, p.rating, p.image, p.external_link, p.latitude, p.longitude, p.created_at \
    FROM trip_steps s LEFT JOIN places p ON p.id = s.place_id";
const STEP_OWNER_JOIN: &str = "JOIN trips t ON t.id = s.trip_id";
const SELECT_STEP_POSITION_SQL: &str = "SELECT s.trip_id, s.step_num, s.status FROM trip_steps s JOIN trips t ON t.id = s.trip_id WHERE s.id = ?1 AND t.owner_id = ?2";
const SELECT_OTHER_ACTIVE_STEP_SQL: &str =
    "SELECT id FROM trip_steps WHERE trip_id = ?1 AND status = 'in_progress' AND id != ?2 LIMIT 1";
const GET_NEXT_STEP_NUM_SQL: &str =
    "SELECT COALESCE(MAX(step_num), 0) + 1 FROM trip_steps WHERE trip_id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO trip_steps (trip_id, place_id, step_num, start_time, end_time, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";
const UPDATE_STEP_STATUS_SQL: &str =
    "UPDATE trip_steps SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_STEP_SQL: &str = "UPDATE trip_steps SET place_id = ?1, start_time = ?2, end_time = ?3, updated_at = ?4 WHERE id = ?5";
const UPDATE_STEP_NUM_SQL: &str =
    "UPDATE trip_steps SET step_num = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_STEP_SQL: &str = "DELETE FROM trip_steps WHERE id = ?1";
// Two passes through negative values keep UNIQUE(trip_id, step_num) satisfied
// row by row.
const SHIFT_DOWN_NEGATED_SQL: &str = "UPDATE trip_steps SET step_num = -(step_num - 1), updated_at = ?3 WHERE trip_id = ?1 AND step_num > ?2";
const RESTORE_NEGATED_SQL: &str =
    "UPDATE trip_steps SET step_num = -step_num WHERE trip_id = ?1 AND step_num < 0";
const SWAP_PARKING_STEP_NUM: i64 = 0;

/// Build a step from a row produced by [`STEP_SELECT`].
fn step_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Step> {
    Ok(Step {
        id: row.get::<_, i64>(0)? as u64,
        trip_id: row.get::<_, i64>(1)? as u64,
        step_num: row.get::<_, i64>(2)? as u32,
        place_id: row.get(3)?,
        start_time: parse_optional_column(row, 4)?,
        end_time: parse_optional_column(row, 5)?,
        status: parse_column(row, 6)?,
        created_at: parse_column(row, 7)?,
        updated_at: parse_column(row, 8)?,
        place: place_from_row(row, 9)?,
    })
}

/// All steps of a trip ordered by `step_num`.
pub(super) fn load_steps(conn: &Connection, trip_id: u64) -> Result<Vec<Step>> {
    let mut stmt = conn
        .prepare(&format!(
            "{STEP_SELECT} WHERE s.trip_id = ?1 ORDER BY s.step_num"
        ))
        .db_context("Failed to prepare query")?;

    let steps = stmt
        .query_map(params![trip_id as i64], step_from_row)
        .db_context("Failed to query steps")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch steps")?;

    Ok(steps)
}

fn load_step(conn: &Connection, owner_id: &str, step_id: u64) -> Result<Option<Step>> {
    conn.query_row(
        &format!("{STEP_SELECT} {STEP_OWNER_JOIN} WHERE s.id = ?1 AND t.owner_id = ?2"),
        params![step_id as i64, owner_id],
        step_from_row,
    )
    .optional()
    .db_context("Failed to get step")
}

fn require_step(conn: &Connection, owner_id: &str, step_id: u64) -> Result<Step> {
    load_step(conn, owner_id, step_id)?.ok_or(TripError::StepNotFound { id: step_id })
}

/// Trip ID, ordinal and status of an owned step.
fn step_position(
    conn: &Connection,
    owner_id: &str,
    step_id: u64,
) -> Result<(u64, i64, StepStatus)> {
    conn.query_row(
        SELECT_STEP_POSITION_SQL,
        params![step_id as i64, owner_id],
        |row| {
            Ok((
                row.get::<_, i64>(0)? as u64,
                row.get::<_, i64>(1)?,
                parse_column(row, 2)?,
            ))
        },
    )
    .map_err(|e| {
        if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            TripError::StepNotFound { id: step_id }
        } else {
            TripError::database_error("Failed to query step", e)
        }
    })
}

impl super::Database {
    /// Retrieves a single step with its place.
    pub fn get_step(&self, owner_id: &str, step_id: u64) -> Result<Option<Step>> {
        load_step(&self.connection, owner_id, step_id)
    }

    /// Appends a `pending` step at the end of a trip.
    pub fn add_step(&mut self, owner_id: &str, trip_id: u64, step: &NewStep) -> Result<Step> {
        if step.place_id.trim().is_empty() {
            return Err(TripError::invalid_input("place_id").with_reason("Place ID cannot be empty"));
        }
        check_time_order(step.start_time, step.end_time)?;

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        if load_trip(&tx, owner_id, trip_id)?.is_none() {
            return Err(TripError::TripNotFound { id: trip_id });
        }
        ensure_place_exists(&tx, &step.place_id)?;

        let step_num: i64 = tx
            .query_row(GET_NEXT_STEP_NUM_SQL, params![trip_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next step number")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_STEP_SQL,
            params![
                trip_id as i64,
                &step.place_id,
                step_num,
                step.start_time.map(|t| t.to_string()),
                step.end_time.map(|t| t.to_string()),
                StepStatus::Pending.as_str(),
                &now,
            ],
        )
        .db_context("Failed to insert step")?;

        let id = tx.last_insert_rowid() as u64;
        touch_trip(&tx, trip_id, &now)?;

        let created = require_step(&tx, owner_id, id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(created)
    }

    /// Sets a step's status. Sibling steps are left alone.
    ///
    /// Moving a step to `in_progress` fails with `StepAlreadyActive` if
    /// another step of the same trip is in progress. Setting the current
    /// status again changes nothing.
    pub fn set_step_status(
        &mut self,
        owner_id: &str,
        step_id: u64,
        status: StepStatus,
    ) -> Result<Step> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let (trip_id, _, current) = step_position(&tx, owner_id, step_id)?;

        if current == status {
            debug!("Step {step_id} is already {status}");
            return require_step(&tx, owner_id, step_id);
        }

        if status == StepStatus::InProgress {
            let active: Option<i64> = tx
                .query_row(
                    SELECT_OTHER_ACTIVE_STEP_SQL,
                    params![trip_id as i64, step_id as i64],
                    |row| row.get(0),
                )
                .optional()
                .db_context("Failed to check for an active step")?;

            if let Some(active) = active {
                return Err(TripError::StepAlreadyActive {
                    trip_id,
                    step_id: active as u64,
                });
            }
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_STEP_STATUS_SQL,
            params![status.as_str(), &now, step_id as i64],
        )
        .db_context("Failed to update step status")?;
        touch_trip(&tx, trip_id, &now)?;

        let updated = require_step(&tx, owner_id, step_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Step {step_id} of trip {trip_id} moved from {current} to {status}");
        Ok(updated)
    }

    /// Edits a step's place or times; status and ordinal are unchanged.
    pub fn update_step(
        &mut self,
        owner_id: &str,
        step_id: u64,
        request: UpdateStepRequest,
    ) -> Result<Step> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current = require_step(&tx, owner_id, step_id)?;
        if request.is_empty() {
            return Ok(current);
        }

        let place_id = request.place_id.unwrap_or(current.place_id);
        let start_time = request.start_time.or(current.start_time);
        let end_time = request.end_time.or(current.end_time);
        check_time_order(start_time, end_time)?;
        ensure_place_exists(&tx, &place_id)?;

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_STEP_SQL,
            params![
                &place_id,
                start_time.map(|t| t.to_string()),
                end_time.map(|t| t.to_string()),
                &now,
                step_id as i64,
            ],
        )
        .db_context("Failed to update step")?;
        touch_trip(&tx, current.trip_id, &now)?;

        let updated = require_step(&tx, owner_id, step_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Swaps the ordinals of two steps of the same trip.
    ///
    /// Swapping a step with itself does nothing.
    pub fn swap_steps(&mut self, owner_id: &str, step_id1: u64, step_id2: u64) -> Result<()> {
        if step_id1 == step_id2 {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let (trip_id1, num1, _) = step_position(&tx, owner_id, step_id1)?;
        let (trip_id2, num2, _) = step_position(&tx, owner_id, step_id2)?;

        if trip_id1 != trip_id2 {
            return Err(TripError::invalid_input("step_ids")
                .with_reason("Steps must be from the same trip to swap"));
        }

        let now = Timestamp::now().to_string();

        tx.execute(
            UPDATE_STEP_NUM_SQL,
            params![SWAP_PARKING_STEP_NUM, &now, step_id1 as i64],
        )
        .db_context("Failed to park first step")?;

        tx.execute(UPDATE_STEP_NUM_SQL, params![num1, &now, step_id2 as i64])
            .db_context("Failed to update second step order")?;

        tx.execute(UPDATE_STEP_NUM_SQL, params![num2, &now, step_id1 as i64])
            .db_context("Failed to update first step order")?;

        touch_trip(&tx, trip_id1, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Swapped steps {step_id1} ({num1}) and {step_id2} ({num2}) of trip {trip_id1}");
        Ok(())
    }

    /// Removes a step and closes the gap so ordinals stay 1..=n.
    ///
    /// Returns the removed step.
    pub fn remove_step(&mut self, owner_id: &str, step_id: u64) -> Result<Step> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let step = require_step(&tx, owner_id, step_id)?;
        let trip_id = step.trip_id as i64;
        let now = Timestamp::now().to_string();

        tx.execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        tx.execute(
            SHIFT_DOWN_NEGATED_SQL,
            params![trip_id, step.step_num as i64, &now],
        )
        .db_context("Failed to renumber steps")?;

        tx.execute(RESTORE_NEGATED_SQL, params![trip_id])
            .db_context("Failed to renumber steps")?;

        touch_trip(&tx, step.trip_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Removed step {step_id} from trip {}", step.trip_id);
        Ok(step)
    }
}
