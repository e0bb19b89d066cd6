//! Realtime per-role queues.
//!
//! A [`Projector`] keeps one role's [`QueueView`] in step with the store: every
//! change event touching orders triggers a re-fetch, and the fresh list is
//! published over a `watch` channel. A failed fetch keeps the last good list
//! on screen and produces a [`Toast`] instead.
//!
//! ```text
//! OrderStore ── ChangeEvent ──▶ Projector::run ── refresh() ──▶ watch<Vec<Order>>
//!                                       │
//!                                       └── fetch error ──▶ mpsc<Toast>
//! ```

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, warn};
use tokio::{
    sync::{broadcast::error::RecvError, mpsc, watch},
    task::JoinHandle,
};

use crate::{
    engine::{category, CategoryPolicy},
    error::BrasaError,
    models::{time, Order, OrderFilter, OrderStatus, Role},
    store::OrderStore,
};

/// Toasts buffered before new ones are dropped.
const TOAST_CAPACITY: usize = 32;

/// A short notification for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub at: Timestamp,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            at: time::now(),
        }
    }
}

impl From<&BrasaError> for Toast {
    fn from(err: &BrasaError) -> Self {
        Self::new(err.toast_message())
    }
}

/// The orders one role currently sees, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueView {
    role: Role,
    category: Option<String>,
    orders: Vec<Order>,
}

impl QueueView {
    pub fn new(role: Role, category: Option<String>) -> Self {
        Self {
            role,
            category,
            orders: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_visible(&self, status: OrderStatus) -> bool {
        self.role.sees(status)
    }

    /// Replaces the list with a fresh fetch, dropping rows the role cannot
    /// see.
    pub fn replace(&mut self, orders: Vec<Order>) {
        let role = self.role;
        self.orders = orders.into_iter().filter(|o| role.sees(o.status)).collect();
        self.sort();
    }

    /// Shows a status change before the store confirms it.
    ///
    /// The row is updated in place, or removed if the role no longer sees the
    /// new status. Returns the row as it was so the caller can
    /// [`restore`](Self::restore) it if the write fails.
    pub fn apply_optimistic(&mut self, order_id: u64, status: OrderStatus) -> Option<Order> {
        let index = self.orders.iter().position(|o| o.id == order_id)?;
        let previous = self.orders[index].clone();
        if self.role.sees(status) {
            self.orders[index].status = status;
        } else {
            self.orders.remove(index);
        }
        Some(previous)
    }

    /// Puts back a row returned by [`apply_optimistic`](Self::apply_optimistic).
    pub fn restore(&mut self, order: Order) {
        self.orders.retain(|o| o.id != order.id);
        if self.role.sees(order.status) {
            self.orders.push(order);
            self.sort();
        }
    }

    fn sort(&mut self) {
        self.orders
            .sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }
}

/// Keeps a [`QueueView`] current from the store's change feed.
pub struct Projector<S: OrderStore> {
    store: Arc<S>,
    category_policy: Arc<dyn CategoryPolicy>,
    view: QueueView,
}

impl<S: OrderStore> Projector<S> {
    pub fn new(
        store: Arc<S>,
        category_policy: Arc<dyn CategoryPolicy>,
        role: Role,
        category: Option<String>,
    ) -> Self {
        Self {
            store,
            category_policy,
            view: QueueView::new(role, category),
        }
    }

    pub fn view(&self) -> &QueueView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut QueueView {
        &mut self.view
    }

    /// Re-fetches the role's queue.
    ///
    /// On failure the current list is kept and a toast describing the error
    /// is returned.
    pub async fn refresh(&mut self) -> Result<&[Order], Toast> {
        let filter = OrderFilter::for_role(self.view.role);
        match self.store.query_orders(&filter).await {
            Ok(orders) => {
                let orders = match self.view.category.as_deref() {
                    Some(wanted) => orders
                        .into_iter()
                        .filter(|o| {
                            category::matches(self.category_policy.as_ref(), &o.items, wanted)
                        })
                        .collect(),
                    None => orders,
                };
                debug!(
                    "Refreshed {} queue: {} orders",
                    self.view.role,
                    orders.len()
                );
                self.view.replace(orders);
                Ok(self.view.orders())
            }
            Err(e) => {
                warn!("Failed to refresh {} queue: {e}", self.view.role);
                Err(Toast::from(&e))
            }
        }
    }

    /// Follows the change feed until `shutdown` flips to `true`, its sender
    /// goes away, or the feed closes.
    pub async fn run(
        mut self,
        snapshots: watch::Sender<Vec<Order>>,
        toasts: mpsc::Sender<Toast>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut changes = self.store.subscribe();

        self.refresh_and_publish(&snapshots, &toasts).await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                event = changes.recv() => match event {
                    Ok(event) if event.touches_orders() => {
                        self.refresh_and_publish(&snapshots, &toasts).await;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(
                            "{} queue missed {skipped} change events, resyncing",
                            self.view.role
                        );
                        self.refresh_and_publish(&snapshots, &toasts).await;
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }

        debug!("{} projector stopped", self.view.role);
    }

    async fn refresh_and_publish(
        &mut self,
        snapshots: &watch::Sender<Vec<Order>>,
        toasts: &mpsc::Sender<Toast>,
    ) {
        match self.refresh().await {
            Ok(orders) => {
                snapshots.send_replace(orders.to_vec());
            }
            Err(toast) => {
                if toasts.try_send(toast).is_err() {
                    debug!("Toast dropped, receiver full or gone");
                }
            }
        }
    }

    /// Runs the projector on its own task.
    pub fn spawn(self) -> ProjectorHandle {
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
        let (toast_tx, toast_rx) = mpsc::channel(TOAST_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(self.run(snapshot_tx, toast_tx, shutdown_rx));

        ProjectorHandle {
            snapshots: snapshot_rx,
            toasts: toast_rx,
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner side of a spawned [`Projector`].
pub struct ProjectorHandle {
    snapshots: watch::Receiver<Vec<Order>>,
    pub toasts: mpsc::Receiver<Toast>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ProjectorHandle {
    /// A receiver that sees every published queue.
    pub fn snapshots(&self) -> watch::Receiver<Vec<Order>> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Vec<Order> {
        self.snapshots.borrow().clone()
    }

    /// Stops the projector and waits for its task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("Projector task ended abnormally: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::models::LineItem;

    fn order(id: u64, status: OrderStatus, minutes_ago: i64) -> Order {
        let created_at = time::now() - SignedDuration::from_mins(minutes_ago);
        Order {
            id,
            number: id as u32,
            customer_name: format!("Customer {id}"),
            customer_phone: "11 90000-0000".to_string(),
            delivery_address: None,
            notes: None,
            items: vec![LineItem::new(1, "Margherita")],
            total_cents: 4000,
            payment_method: None,
            status,
            pizzaiolo_id: None,
            entregador_id: None,
            preparation_started_at: None,
            ready_at: None,
            route_started_at: None,
            route_ended_at: None,
            distance_km: None,
            estimated_minutes: None,
            driver_position: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_replace_keeps_visible_rows_oldest_first() {
        let mut view = QueueView::new(Role::Kitchen, None);
        view.replace(vec![
            order(1, OrderStatus::Pending, 5),
            order(2, OrderStatus::Ready, 30),
            order(3, OrderStatus::Preparing, 20),
        ]);

        let ids: Vec<u64> = view.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_optimistic_update_in_place() {
        let mut view = QueueView::new(Role::Kitchen, None);
        view.replace(vec![order(1, OrderStatus::Pending, 5)]);

        let previous = view.apply_optimistic(1, OrderStatus::Preparing);
        assert_eq!(previous.map(|o| o.status), Some(OrderStatus::Pending));
        assert_eq!(view.orders()[0].status, OrderStatus::Preparing);
    }

    #[test]
    fn test_optimistic_update_removes_invisible_row_and_restores() {
        let mut view = QueueView::new(Role::Kitchen, None);
        view.replace(vec![
            order(1, OrderStatus::Preparing, 10),
            order(2, OrderStatus::Pending, 5),
        ]);

        let previous = view
            .apply_optimistic(1, OrderStatus::Ready)
            .expect("row is in the view");
        assert_eq!(view.orders().len(), 1);
        assert!(!view.is_visible(OrderStatus::Ready));

        view.restore(previous);
        let ids: Vec<u64> = view.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_optimistic_update_unknown_row() {
        let mut view = QueueView::new(Role::Driver, None);
        assert!(view.apply_optimistic(9, OrderStatus::Delivered).is_none());
    }

    #[test]
    fn test_toast_from_error() {
        let toast = Toast::from(&BrasaError::OrderNotFound { id: 5 });
        assert_eq!(toast.message, "Order 5 not found");
    }
}
