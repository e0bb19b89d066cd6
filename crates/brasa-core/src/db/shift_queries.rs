//! Shift clock queries.

use jiff::Timestamp;
use rusqlite::{params, params_from_iter, OptionalExtension, Row, ToSql, TransactionBehavior};

use super::utils::{date_at, id_at, optional_timestamp_at, timestamp_at};
use crate::{
    error::{BrasaError, DatabaseResultExt, Result},
    models::{time, ShiftClaim, ShiftFilter, TimeTrack},
};

const SHIFT_COLUMNS: &str = "id, user_id, shift_date, entered_at, exited_at";
const SELECT_OPEN_SHIFT_SQL: &str =
    "SELECT id, user_id, shift_date, entered_at, exited_at FROM time_tracks WHERE user_id = ?1 AND exited_at IS NULL";
const SELECT_SHIFT_SQL: &str =
    "SELECT id, user_id, shift_date, entered_at, exited_at FROM time_tracks WHERE id = ?1";
const INSERT_SHIFT_SQL: &str =
    "INSERT INTO time_tracks (user_id, shift_date, entered_at) VALUES (?1, ?2, ?3)";
const CLOSE_SHIFT_SQL: &str = "UPDATE time_tracks SET exited_at = ?1 WHERE id = ?2";

impl super::Database {
    fn build_shift_from_row(row: &Row) -> rusqlite::Result<TimeTrack> {
        Ok(TimeTrack {
            id: id_at(row, 0)?,
            user_id: row.get(1)?,
            shift_date: date_at(row, 2)?,
            entered_at: timestamp_at(row, 3)?,
            exited_at: optional_timestamp_at(row, 4)?,
        })
    }

    /// The user's open shift, whatever day it was opened.
    pub fn find_open_shift(&self, user_id: &str) -> Result<Option<TimeTrack>> {
        self.connection
            .query_row(SELECT_OPEN_SHIFT_SQL, params![user_id], Self::build_shift_from_row)
            .optional()
            .db_context("Failed to query open shift")
    }

    /// Returns the user's open shift for the day of `now`, opening one if
    /// needed.
    ///
    /// A shift still open from an earlier day is closed at `now` before the
    /// new one is opened, so the user never holds two open shifts.
    pub fn ensure_open_shift(&mut self, user_id: &str, now: Timestamp) -> Result<ShiftClaim> {
        if user_id.trim().is_empty() {
            return Err(BrasaError::invalid_input("user_id").with_reason("cannot be empty"));
        }

        let today = time::utc_date(now);
        let now_str = now.to_string();

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let open = tx
            .query_row(SELECT_OPEN_SHIFT_SQL, params![user_id], Self::build_shift_from_row)
            .optional()
            .db_context("Failed to query open shift")?;

        match open {
            Some(shift) if shift.shift_date == today => {
                tx.commit().db_context("Failed to commit transaction")?;
                return Ok(ShiftClaim {
                    shift,
                    opened: false,
                });
            }
            Some(stale) => {
                tx.execute(CLOSE_SHIFT_SQL, params![&now_str, stale.id as i64])
                    .db_context("Failed to close previous shift")?;
            }
            None => {}
        }

        tx.execute(
            INSERT_SHIFT_SQL,
            params![user_id, today.to_string(), &now_str],
        )
        .db_context("Failed to open shift")?;

        let id = tx.last_insert_rowid();
        let shift = tx
            .query_row(SELECT_SHIFT_SQL, params![id], Self::build_shift_from_row)
            .db_context("Failed to read opened shift")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ShiftClaim {
            shift,
            opened: true,
        })
    }

    /// Closes the user's open shift at `now`.
    pub fn close_shift(&mut self, user_id: &str, now: Timestamp) -> Result<TimeTrack> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let open = tx
            .query_row(SELECT_OPEN_SHIFT_SQL, params![user_id], Self::build_shift_from_row)
            .optional()
            .db_context("Failed to query open shift")?
            .ok_or_else(|| BrasaError::NoOpenShift {
                user_id: user_id.to_string(),
            })?;

        tx.execute(CLOSE_SHIFT_SQL, params![now.to_string(), open.id as i64])
            .db_context("Failed to close shift")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TimeTrack {
            exited_at: Some(now),
            ..open
        })
    }

    /// Lists shifts, most recent first.
    pub fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<TimeTrack>> {
        let mut query = format!("SELECT {SHIFT_COLUMNS} FROM time_tracks");
        let mut conditions: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref user_id) = filter.user_id {
            conditions.push("user_id = ?");
            params_vec.push(Box::new(user_id.clone()));
        }
        if filter.open_only {
            conditions.push("exited_at IS NULL");
        }
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY entered_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params_vec.push(Box::new(i64::from(limit)));
        }

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare shift query")?;

        let shifts = stmt
            .query_map(
                params_from_iter(params_vec.iter().map(|p| p.as_ref())),
                Self::build_shift_from_row,
            )
            .db_context("Failed to query shifts")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch shifts")?;

        Ok(shifts)
    }
}
