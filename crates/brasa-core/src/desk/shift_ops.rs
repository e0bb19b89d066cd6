//! Shift clock operations for the OrderDesk.

use log::info;

use super::OrderDesk;
use crate::{
    error::Result,
    models::{time, ShiftClaim, ShiftFilter, TimeTrack},
    store::OrderStore,
};

impl<S: OrderStore> OrderDesk<S> {
    /// Returns the user's open shift for today, opening one if needed.
    ///
    /// Calling this any number of times leaves exactly one open shift.
    pub async fn ensure_open_shift(&self, user_id: &str) -> Result<TimeTrack> {
        Ok(self.clock_in(user_id).await?.shift)
    }

    /// Like [`Self::ensure_open_shift`], also reporting whether a shift was
    /// opened by this call.
    pub async fn clock_in(&self, user_id: &str) -> Result<ShiftClaim> {
        let claim = self.store.ensure_open_shift(user_id, time::now()).await?;
        if claim.opened {
            info!("Clocked in {user_id} on shift {}", claim.shift.id);
        }
        Ok(claim)
    }

    /// Closes the user's open shift.
    ///
    /// # Errors
    ///
    /// `BrasaError::NoOpenShift` when the user is not clocked in.
    pub async fn clock_out(&self, user_id: &str) -> Result<TimeTrack> {
        let shift = self.store.close_shift(user_id, time::now()).await?;
        info!("Clocked out {user_id} from shift {}", shift.id);
        Ok(shift)
    }

    pub async fn open_shift(&self, user_id: &str) -> Result<Option<TimeTrack>> {
        self.store.find_open_shift(user_id).await
    }

    /// The user's most recent shifts, newest first.
    pub async fn recent_shifts(&self, user_id: &str, limit: u32) -> Result<Vec<TimeTrack>> {
        self.store
            .list_shifts(&ShiftFilter {
                user_id: Some(user_id.to_string()),
                open_only: false,
                limit: Some(limit),
            })
            .await
    }
}
