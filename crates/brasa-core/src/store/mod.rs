//! The order store seam.
//!
//! [`OrderStore`] is everything the coordinator and the projector need from
//! persistence: queries, the conditional transition write, shift rows,
//! metric rows and a change feed. [`SqliteStore`] is the shipped backend.
//!
//! ```text
//! OrderDesk ──▶ OrderStore::apply_transition ──▶ UPDATE ... WHERE status = <from>
//!                     │
//!                     └── ChangeEvent ──▶ broadcast ──▶ Projector (one per screen)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::broadcast;

use crate::{
    error::Result,
    models::{
        MetricFilter, NewOrder, Order, OrderFilter, OrderStatus, ProductionMetric, ShiftClaim,
        ShiftFilter, TimeTrack, TransitionWrite,
    },
};

pub mod sqlite;

pub use sqlite::SqliteStore;

/// Broadcast capacity for change events.
pub const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Table a change event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Orders,
    TimeTracks,
    ProductionMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    /// Another process wrote the database; the affected rows are unknown
    External,
}

/// A row-level change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// `None` for external changes
    pub table: Option<Table>,
    pub kind: ChangeKind,
    pub row_id: Option<u64>,
    /// New status, for order rows
    pub status: Option<OrderStatus>,
}

impl ChangeEvent {
    pub fn order_inserted(order: &Order) -> Self {
        Self {
            table: Some(Table::Orders),
            kind: ChangeKind::Insert,
            row_id: Some(order.id),
            status: Some(order.status),
        }
    }

    pub fn order_updated(order: &Order) -> Self {
        Self {
            table: Some(Table::Orders),
            kind: ChangeKind::Update,
            row_id: Some(order.id),
            status: Some(order.status),
        }
    }

    pub fn row(table: Table, kind: ChangeKind, row_id: u64) -> Self {
        Self {
            table: Some(table),
            kind,
            row_id: Some(row_id),
            status: None,
        }
    }

    pub fn external() -> Self {
        Self {
            table: None,
            kind: ChangeKind::External,
            row_id: None,
            status: None,
        }
    }

    /// Whether a queue built from the orders table may be out of date.
    pub fn touches_orders(&self) -> bool {
        matches!(self.table, None | Some(Table::Orders))
    }
}

/// Persistence for orders, shifts and production metrics.
///
/// ## Conditional writes
///
/// [`OrderStore::apply_transition`] must only write when the row still holds
/// `write.from`. When it does not, the implementation returns
/// [`crate::BrasaError::StaleState`] with the status it found and leaves the
/// row untouched. The metric in `write.metric`, if any, lands in the same
/// transaction as the status change.
///
/// ## Change feed
///
/// Every successful write publishes a [`ChangeEvent`] to the receivers
/// returned by [`OrderStore::subscribe`].
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Inserts a new pending order.
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;

    async fn get_order(&self, id: u64) -> Result<Option<Order>>;

    async fn query_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>>;

    /// Writes a transition if the order still has `write.from`.
    async fn apply_transition(&self, write: TransitionWrite) -> Result<Order>;

    async fn find_open_shift(&self, user_id: &str) -> Result<Option<TimeTrack>>;

    /// Returns the user's open shift for the day of `now`, opening one if
    /// there is none.
    async fn ensure_open_shift(&self, user_id: &str, now: Timestamp) -> Result<ShiftClaim>;

    async fn close_shift(&self, user_id: &str, now: Timestamp) -> Result<TimeTrack>;

    async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<TimeTrack>>;

    async fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<ProductionMetric>>;

    async fn get_metric(&self, order_id: u64) -> Result<Option<ProductionMetric>>;

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}

#[async_trait]
impl<S: OrderStore> OrderStore for Arc<S> {
    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        (**self).insert_order(order).await
    }

    async fn get_order(&self, id: u64) -> Result<Option<Order>> {
        (**self).get_order(id).await
    }

    async fn query_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        (**self).query_orders(filter).await
    }

    async fn apply_transition(&self, write: TransitionWrite) -> Result<Order> {
        (**self).apply_transition(write).await
    }

    async fn find_open_shift(&self, user_id: &str) -> Result<Option<TimeTrack>> {
        (**self).find_open_shift(user_id).await
    }

    async fn ensure_open_shift(&self, user_id: &str, now: Timestamp) -> Result<ShiftClaim> {
        (**self).ensure_open_shift(user_id, now).await
    }

    async fn close_shift(&self, user_id: &str, now: Timestamp) -> Result<TimeTrack> {
        (**self).close_shift(user_id, now).await
    }

    async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<TimeTrack>> {
        (**self).list_shifts(filter).await
    }

    async fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<ProductionMetric>> {
        (**self).list_metrics(filter).await
    }

    async fn get_metric(&self, order_id: u64) -> Result<Option<ProductionMetric>> {
        (**self).get_metric(order_id).await
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        (**self).subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_events_touch_orders() {
        assert!(ChangeEvent::external().touches_orders());
        assert!(!ChangeEvent::row(Table::TimeTracks, ChangeKind::Insert, 3).touches_orders());
        assert!(ChangeEvent::row(Table::Orders, ChangeKind::Update, 3).touches_orders());
    }
}
