//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::datetime::{Elapsed, LocalDateTime};
use crate::{
    desk::TransitionOutcome,
    models::{Order, OrderStatus, ShiftClaim},
};

/// Confirmation for a newly entered order.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Order> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created order #{} with ID: {}",
            self.resource.number, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for TransitionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Order #{} moved from {} to {}",
            self.order.number,
            self.plan.from.label(),
            self.plan.to.label()
        )?;
        writeln!(f)?;

        if let Some(shift) = &self.opened_shift {
            writeln!(
                f,
                "- Clocked in {} at {}",
                shift.user_id,
                LocalDateTime(&shift.entered_at)
            )?;
        }
        if let Some(metric) = &self.metric {
            write!(f, "- Preparation time: {}", Elapsed(metric.prep_seconds))?;
            if let Some(category) = &metric.category {
                write!(f, " [{category}]")?;
            }
            writeln!(f)?;
        }
        if let (OrderStatus::OutForDelivery, Some(km), Some(minutes)) = (
            self.plan.to,
            self.order.distance_km,
            self.order.estimated_minutes,
        ) {
            writeln!(f, "- Route estimate: {km:.1} km, {minutes:.0} min")?;
        }
        if let Some(minutes) = self.order.route_minutes() {
            writeln!(f, "- Route took {minutes:.0} min")?;
        }
        Ok(())
    }
}

impl fmt::Display for ShiftClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.opened {
            writeln!(
                f,
                "Clocked in {} at {}",
                self.shift.user_id,
                LocalDateTime(&self.shift.entered_at)
            )
        } else {
            writeln!(
                f,
                "{} already clocked in since {}",
                self.shift.user_id,
                LocalDateTime(&self.shift.entered_at)
            )
        }
    }
}
