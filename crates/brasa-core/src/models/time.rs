//! Clock helpers shared by the engine and the store.

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use crate::error::{BrasaError, Result};

/// Current time truncated to whole seconds.
///
/// Stored timestamps are written in this form so their text sorts
/// chronologically.
pub fn now() -> Timestamp {
    truncate_to_second(Timestamp::now())
}

pub fn truncate_to_second(ts: Timestamp) -> Timestamp {
    Timestamp::from_second(ts.as_second()).unwrap_or(ts)
}

/// UTC calendar day of a timestamp.
pub fn utc_date(ts: Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

/// Half-open `[start, end)` range covering a UTC calendar day.
pub fn day_bounds(date: Date) -> Result<(Timestamp, Timestamp)> {
    let start = date
        .to_zoned(TimeZone::UTC)
        .map_err(|e| BrasaError::invalid_input("date").with_reason(e.to_string()))?
        .timestamp();
    let end = date
        .tomorrow()
        .and_then(|d| d.to_zoned(TimeZone::UTC))
        .map_err(|e| BrasaError::invalid_input("date").with_reason(e.to_string()))?
        .timestamp();
    Ok((start, end))
}

/// Whole seconds from `start` to `end`, never negative.
pub fn elapsed_seconds(start: Timestamp, end: Timestamp) -> i64 {
    (end.as_second() - start.as_second()).max(0)
}
