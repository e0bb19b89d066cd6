//! Derived production and delivery figures.

use std::collections::BTreeMap;

use jiff::{civil::Date, Timestamp};
use serde::Serialize;

use super::{Order, OrderStatus};

/// A pizzaiolo's figures for one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductionStats {
    pub user_id: String,

    /// Orders placed that day and claimed by the user
    pub claimed: usize,

    /// Of those, how many have left the kitchen
    pub completed: usize,

    /// Mean preparation time over the user's metrics that day
    pub avg_prep_seconds: Option<f64>,
}

/// A driver's figures for one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeliveryStats {
    pub user_id: String,

    /// Orders placed that day and taken by the driver
    pub assigned: usize,

    pub delivered: usize,
}

/// A driver's recent deliveries with averages over them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeliveryHistory {
    pub user_id: String,
    pub deliveries: Vec<Order>,
    pub avg_route_minutes: Option<f64>,
    pub avg_distance_km: Option<f64>,
}

impl DeliveryHistory {
    pub fn new(user_id: String, deliveries: Vec<Order>) -> Self {
        let avg_route_minutes = mean(deliveries.iter().filter_map(Order::route_minutes));
        let avg_distance_km = mean(deliveries.iter().filter_map(|o| o.distance_km));
        Self {
            user_id,
            deliveries,
            avg_route_minutes,
            avg_distance_km,
        }
    }
}

/// One staff member's line in a [`PerformanceRanking`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffPerformance {
    pub user_id: String,

    pub orders: usize,

    /// Mean seconds per order: preparation time for the kitchen, placement
    /// to delivery for drivers
    pub avg_seconds: f64,

    /// `orders * 10 - average minutes`; higher is better
    pub rating: f64,
}

impl StaffPerformance {
    pub fn new(user_id: String, orders: usize, total_seconds: i64) -> Self {
        let avg_seconds = if orders == 0 {
            0.0
        } else {
            total_seconds as f64 / orders as f64
        };
        Self {
            user_id,
            orders,
            avg_seconds,
            rating: orders as f64 * 10.0 - avg_seconds / 60.0,
        }
    }
}

/// Groups `(user, seconds)` samples per user and sorts by rating, best first.
///
/// Ties go to the user id in ascending order.
///
/// ```rust
/// use brasa_core::models::stats::rank;
///
/// let ranking = rank(vec![
///     ("ana".to_string(), 600),
///     ("caio".to_string(), 300),
///     ("ana".to_string(), 1200),
/// ]);
/// assert_eq!(ranking[0].user_id, "ana");
/// assert_eq!(ranking[0].orders, 2);
/// assert_eq!(ranking[0].avg_seconds, 900.0);
/// assert_eq!(ranking[0].rating, 5.0);
/// ```
pub fn rank(samples: impl IntoIterator<Item = (String, i64)>) -> Vec<StaffPerformance> {
    let mut totals: BTreeMap<String, (usize, i64)> = BTreeMap::new();
    for (user_id, seconds) in samples {
        let entry = totals.entry(user_id).or_default();
        entry.0 += 1;
        entry.1 += seconds;
    }

    let mut ranking: Vec<StaffPerformance> = totals
        .into_iter()
        .map(|(user_id, (orders, total))| StaffPerformance::new(user_id, orders, total))
        .collect();
    ranking.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    ranking
}

/// Kitchen and driver rankings over a trailing window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformanceRanking {
    /// Start of the window (inclusive)
    pub since: Timestamp,
    pub pizzaiolos: Vec<StaffPerformance>,
    pub drivers: Vec<StaffPerformance>,
}

/// How many of a day's orders sit in each status.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrdersOverview {
    pub date: Date,
    /// Every status in lifecycle order, zero counts included
    pub counts: Vec<(OrderStatus, usize)>,
}

impl OrdersOverview {
    pub fn from_orders(date: Date, orders: &[Order]) -> Self {
        let counts = OrderStatus::ALL
            .iter()
            .map(|status| (*status, orders.iter().filter(|o| o.status == *status).count()))
            .collect();
        Self { date, counts }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
