//! Order entry, lookups and role queues for the OrderDesk.

use log::info;
use tokio::sync::broadcast;

use super::OrderDesk;
use crate::{
    engine::category,
    error::Result,
    models::{NewOrder, Order, OrderFilter, Role},
    projector::Projector,
    store::{ChangeEvent, OrderStore},
};

impl<S: OrderStore> OrderDesk<S> {
    /// Enters a new order. Orders always start pending.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order> {
        let order = self.store.insert_order(order).await?;
        info!("Order {} (#{}) placed for {}", order.id, order.number, order.customer_name);
        Ok(order)
    }

    pub async fn get_order(&self, id: u64) -> Result<Option<Order>> {
        self.store.get_order(id).await
    }

    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        self.store.query_orders(filter).await
    }

    /// The orders a role works on, oldest first.
    ///
    /// `category` keeps only orders whose derived category matches, compared
    /// case-insensitively.
    pub async fn queue(&self, role: Role, category: Option<&str>) -> Result<Vec<Order>> {
        let orders = self.store.query_orders(&OrderFilter::for_role(role)).await?;
        Ok(match category {
            Some(wanted) => orders
                .into_iter()
                .filter(|o| category::matches(self.category_policy.as_ref(), &o.items, wanted))
                .collect(),
            None => orders,
        })
    }

    /// A projector over this desk's store for one role's queue.
    pub fn projector(&self, role: Role, category: Option<String>) -> Projector<S> {
        Projector::new(
            self.store.clone(),
            self.category_policy.clone(),
            role,
            category,
        )
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.store.subscribe()
    }
}
