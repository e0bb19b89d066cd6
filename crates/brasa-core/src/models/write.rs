//! Write intents produced by the coordinator and applied by the store.

use jiff::Timestamp;

use super::{NewProductionMetric, OrderStatus, RouteEstimate};

/// Fields a transition sets on the order row.
///
/// Every field is set-only: `None` leaves the stored value untouched, so a
/// transition can never clear an owner or a timestamp written earlier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub pizzaiolo_id: Option<String>,
    pub entregador_id: Option<String>,
    pub preparation_started_at: Option<Timestamp>,
    pub ready_at: Option<Timestamp>,
    pub route_started_at: Option<Timestamp>,
    pub route_ended_at: Option<Timestamp>,
    pub route: Option<RouteEstimate>,
}

/// A conditional status write plus the rows that must land with it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionWrite {
    pub order_id: u64,
    /// Status the row must still have for the write to apply
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub at: Timestamp,
    pub patch: OrderPatch,
    pub metric: Option<NewProductionMetric>,
}
