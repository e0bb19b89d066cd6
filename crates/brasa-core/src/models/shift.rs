//! Shift clock records.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// A staff member's clocked-in interval for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeTrack {
    pub id: u64,

    pub user_id: String,

    /// UTC calendar day the shift belongs to
    pub shift_date: Date,

    pub entered_at: Timestamp,

    /// `None` while the shift is open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exited_at: Option<Timestamp>,
}

impl TimeTrack {
    pub fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }
}

/// Result of asking for an open shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftClaim {
    pub shift: TimeTrack,
    /// True when the call had to open a new shift
    pub opened: bool,
}
