//! Display implementations for domain models.
//!
//! Everything renders as markdown for the terminal renderer.

use std::fmt;

use super::datetime::{Elapsed, LocalDateTime, Money};
use crate::models::{
    DeliveryHistory, DeliveryStats, LineItem, Order, OrdersOverview, PerformanceRanking,
    ProductionMetric, ProductionStats, StaffPerformance, TimeTrack,
};

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.quantity, self.name)?;
        if let Some(size) = &self.size {
            write!(f, " ({size})")?;
        }
        Ok(())
    }
}

impl Order {
    fn fmt_order(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### #{} {} ({})",
            self.number,
            self.customer_name,
            self.status.label()
        )?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Phone: {}", self.customer_phone)?;
        if let Some(address) = &self.delivery_address {
            writeln!(f, "- Address: {address}")?;
        }
        writeln!(f, "- Total: {}", Money(self.total_cents))?;
        if let Some(payment) = &self.payment_method {
            writeln!(f, "- Payment: {payment}")?;
        }
        writeln!(f, "- Placed: {}", LocalDateTime(&self.created_at))?;

        if let Some(pizzaiolo) = &self.pizzaiolo_id {
            writeln!(f, "- Pizzaiolo: {pizzaiolo}")?;
        }
        if let Some(started) = &self.preparation_started_at {
            writeln!(f, "- Preparation started: {}", LocalDateTime(started))?;
        }
        if let Some(ready) = &self.ready_at {
            writeln!(f, "- Ready: {}", LocalDateTime(ready))?;
        }
        if let Some(driver) = &self.entregador_id {
            writeln!(f, "- Driver: {driver}")?;
        }
        if let Some(started) = &self.route_started_at {
            writeln!(f, "- Route started: {}", LocalDateTime(started))?;
        }
        if let (Some(km), Some(minutes)) = (self.distance_km, self.estimated_minutes) {
            writeln!(f, "- Route estimate: {km:.1} km, {minutes:.0} min")?;
        }
        if let Some(ended) = &self.route_ended_at {
            writeln!(f, "- Delivered: {}", LocalDateTime(ended))?;
        }
        writeln!(f)?;

        for item in &self.items {
            writeln!(f, "- {item}")?;
        }
        writeln!(f)?;

        if let Some(notes) = &self.notes {
            writeln!(f, "> {notes}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_order(f)
    }
}

impl fmt::Display for TimeTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} shift {} ({}): in {}",
            self.user_id,
            self.id,
            self.shift_date,
            LocalDateTime(&self.entered_at)
        )?;
        match &self.exited_at {
            Some(exited) => writeln!(
                f,
                ", out {} ({})",
                LocalDateTime(exited),
                Elapsed(exited.as_second() - self.entered_at.as_second())
            ),
            None => writeln!(f, ", still open"),
        }
    }
}

impl fmt::Display for ProductionMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- Order {}: {} by {}",
            self.order_id,
            Elapsed(self.prep_seconds),
            self.pizzaiolo_id
        )?;
        if let Some(category) = &self.category {
            write!(f, " [{category}]")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ProductionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Production: {}", self.user_id)?;
        writeln!(f)?;
        writeln!(f, "- **Claimed today**: {}", self.claimed)?;
        writeln!(f, "- **Completed**: {}", self.completed)?;
        match self.avg_prep_seconds {
            Some(avg) => writeln!(f, "- **Average preparation**: {}", Elapsed(avg.round() as i64)),
            None => writeln!(f, "- **Average preparation**: n/a"),
        }
    }
}

impl fmt::Display for DeliveryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Deliveries: {}", self.user_id)?;
        writeln!(f)?;
        writeln!(f, "- **Assigned today**: {}", self.assigned)?;
        writeln!(f, "- **Delivered**: {}", self.delivered)
    }
}

impl fmt::Display for DeliveryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Delivery history: {}", self.user_id)?;
        writeln!(f)?;
        if self.deliveries.is_empty() {
            return writeln!(f, "No deliveries found.");
        }

        writeln!(f, "- **Deliveries**: {}", self.deliveries.len())?;
        if let Some(minutes) = self.avg_route_minutes {
            writeln!(f, "- **Average route**: {minutes:.1} min")?;
        }
        if let Some(km) = self.avg_distance_km {
            writeln!(f, "- **Average distance**: {km:.1} km")?;
        }
        writeln!(f)?;

        for order in &self.deliveries {
            write!(f, "- #{} {}", order.number, order.customer_name)?;
            if let Some(ended) = &order.route_ended_at {
                write!(f, ", {}", LocalDateTime(ended))?;
            }
            if let Some(minutes) = order.route_minutes() {
                write!(f, ", {minutes:.0} min")?;
            }
            if let Some(km) = order.distance_km {
                write!(f, ", {km:.1} km")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn fmt_ranking(f: &mut fmt::Formatter<'_>, staff: &[StaffPerformance]) -> fmt::Result {
    if staff.is_empty() {
        return writeln!(f, "No orders in this window.");
    }
    for (place, entry) in staff.iter().enumerate() {
        writeln!(
            f,
            "{}. **{}**: {} orders, {} average, rating {:.1}",
            place + 1,
            entry.user_id,
            entry.orders,
            Elapsed(entry.avg_seconds.round() as i64),
            entry.rating
        )?;
    }
    Ok(())
}

impl fmt::Display for PerformanceRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Ranking since {}", LocalDateTime(&self.since))?;
        writeln!(f)?;
        writeln!(f, "### Kitchen")?;
        writeln!(f)?;
        fmt_ranking(f, &self.pizzaiolos)?;
        writeln!(f)?;
        writeln!(f, "### Delivery")?;
        writeln!(f)?;
        fmt_ranking(f, &self.drivers)
    }
}

impl fmt::Display for OrdersOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Orders on {}", self.date)?;
        writeln!(f)?;
        writeln!(f, "- **Total**: {}", self.total())?;
        for (status, count) in &self.counts {
            writeln!(f, "- **{}**: {count}", status.label())?;
        }
        Ok(())
    }
}
