//! Production and delivery figures for the OrderDesk.

use jiff::{civil::Date, SignedDuration};

use super::OrderDesk;
use crate::{
    error::{BrasaError, Result},
    models::{
        stats::{mean, rank},
        time, DeliveryHistory, DeliveryStats, MetricFilter, Order, OrderFilter, OrderSort,
        OrderStatus, OrdersOverview, PerformanceRanking, ProductionStats, ShiftFilter, TimeTrack,
    },
    store::OrderStore,
};

/// Deliveries shown in a driver's history when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Trailing window of the performance ranking, in days.
pub const RANKING_WINDOW_DAYS: u32 = 30;

pub const DEFAULT_ATTENDANCE_LIMIT: u32 = 50;

pub const DEFAULT_ORDER_HISTORY_LIMIT: u32 = 100;

impl<S: OrderStore> OrderDesk<S> {
    /// A pizzaiolo's claimed and completed orders among those placed on
    /// `date`, with their average preparation time that day.
    pub async fn production_stats(&self, user_id: &str, date: Date) -> Result<ProductionStats> {
        let (start, end) = time::day_bounds(date)?;

        let orders = self
            .store
            .query_orders(&OrderFilter {
                pizzaiolo_id: Some(user_id.to_string()),
                ..Default::default()
            }
            .created_between(start, end))
            .await?;

        let metrics = self
            .store
            .list_metrics(&MetricFilter {
                pizzaiolo_id: Some(user_id.to_string()),
                finished_after: Some(start),
                finished_before: Some(end),
            })
            .await?;

        Ok(ProductionStats {
            user_id: user_id.to_string(),
            claimed: orders.len(),
            completed: orders.iter().filter(|o| o.status.is_ready_or_later()).count(),
            avg_prep_seconds: mean(metrics.iter().map(|m| m.prep_seconds as f64)),
        })
    }

    /// Kitchen-wide average preparation time for orders finished on `date`.
    pub async fn average_prep_seconds(&self, date: Date) -> Result<Option<f64>> {
        let (start, end) = time::day_bounds(date)?;
        let metrics = self
            .store
            .list_metrics(&MetricFilter {
                pizzaiolo_id: None,
                finished_after: Some(start),
                finished_before: Some(end),
            })
            .await?;
        Ok(mean(metrics.iter().map(|m| m.prep_seconds as f64)))
    }

    pub async fn delivery_stats(&self, user_id: &str, date: Date) -> Result<DeliveryStats> {
        let (start, end) = time::day_bounds(date)?;
        let orders = self
            .store
            .query_orders(&OrderFilter {
                entregador_id: Some(user_id.to_string()),
                ..Default::default()
            }
            .created_between(start, end))
            .await?;

        Ok(DeliveryStats {
            user_id: user_id.to_string(),
            assigned: orders.len(),
            delivered: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Delivered)
                .count(),
        })
    }

    /// A driver's delivered orders, most recent route end first.
    pub async fn delivery_history(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<DeliveryHistory> {
        let deliveries = self
            .store
            .query_orders(&OrderFilter {
                statuses: vec![OrderStatus::Delivered],
                entregador_id: Some(user_id.to_string()),
                order_by: OrderSort::RouteEndedDesc,
                limit: Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
                ..Default::default()
            })
            .await?;
        Ok(DeliveryHistory::new(user_id.to_string(), deliveries))
    }

    /// Ranks pizzaiolos by their production metrics and drivers by their
    /// delivered orders over the last `days` days.
    ///
    /// A driver's time per order runs from placement to the end of the
    /// route.
    ///
    /// # Errors
    ///
    /// `BrasaError::InvalidInput` when `days` is zero or reaches before the
    /// earliest representable time.
    pub async fn performance_ranking(&self, days: u32) -> Result<PerformanceRanking> {
        if days == 0 {
            return Err(BrasaError::invalid_input("days").with_reason("must be at least 1"));
        }
        let since = time::now()
            .checked_sub(SignedDuration::from_hours(i64::from(days) * 24))
            .map_err(|e| BrasaError::invalid_input("days").with_reason(e.to_string()))?;

        let metrics = self
            .store
            .list_metrics(&MetricFilter {
                finished_after: Some(since),
                ..Default::default()
            })
            .await?;

        let delivered = self
            .store
            .query_orders(&OrderFilter {
                statuses: vec![OrderStatus::Delivered],
                created_after: Some(since),
                ..Default::default()
            })
            .await?;

        Ok(PerformanceRanking {
            since,
            pizzaiolos: rank(
                metrics
                    .into_iter()
                    .map(|m| (m.pizzaiolo_id, m.prep_seconds)),
            ),
            drivers: rank(delivered.into_iter().filter_map(|o| {
                let ended = o.route_ended_at.unwrap_or(o.updated_at);
                let seconds = time::elapsed_seconds(o.created_at, ended);
                o.entregador_id.map(|driver| (driver, seconds))
            })),
        })
    }

    /// Counts the orders placed on `date` per status.
    pub async fn orders_overview(&self, date: Date) -> Result<OrdersOverview> {
        let (start, end) = time::day_bounds(date)?;
        let orders = self
            .store
            .query_orders(&OrderFilter::default().created_between(start, end))
            .await?;
        Ok(OrdersOverview::from_orders(date, &orders))
    }

    /// Every user's shifts, most recent first.
    pub async fn attendance_report(&self, limit: Option<u32>) -> Result<Vec<TimeTrack>> {
        self.store
            .list_shifts(&ShiftFilter {
                user_id: None,
                open_only: false,
                limit: Some(limit.unwrap_or(DEFAULT_ATTENDANCE_LIMIT)),
            })
            .await
    }

    /// Recent orders, newest first, optionally only those a pizzaiolo
    /// claimed.
    pub async fn order_history(
        &self,
        pizzaiolo_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Order>> {
        self.store
            .query_orders(&OrderFilter {
                pizzaiolo_id: pizzaiolo_id.map(str::to_string),
                order_by: OrderSort::CreatedDesc,
                limit: Some(limit.unwrap_or(DEFAULT_ORDER_HISTORY_LIMIT)),
                ..Default::default()
            })
            .await
    }
}
