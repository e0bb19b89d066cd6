//! The side-effect coordinator.
//!
//! [`OrderDesk`] is what screens and the CLI talk to. It validates a move
//! with [`crate::engine::plan_transition`], turns the planned side effects
//! into a single conditional store write and reports what happened.
//!
//! ```text
//! ┌───────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ plan_transition│──▶│ OrderDesk       │───▶│ OrderStore      │
//! │ (pure rules)  │    │ (effects, logs) │    │ (conditional    │
//! └───────────────┘    └─────────────────┘    │  write + events)│
//!                                             └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: [`OrderDeskBuilder`] with the database path and policies
//! - [`transition_ops`]: lifecycle moves
//! - [`shift_ops`]: clock in and clock out
//! - [`order_ops`]: order entry, lookups and role queues
//! - [`stats_ops`]: production and delivery figures
//!
//! # Usage
//!
//! ```rust
//! use brasa_core::{models::{Actor, LineItem, NewOrder}, OrderDeskBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let desk = OrderDeskBuilder::new()
//!     .with_database_path(Some("/tmp/brasa-example.db"))
//!     .build()
//!     .await?;
//!
//! let order = desk
//!     .create_order(NewOrder {
//!         customer_name: "Bruna".to_string(),
//!         customer_phone: "11 98888-7777".to_string(),
//!         items: vec![LineItem::new(1, "Brigadeiro")],
//!         total_cents: 3800,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let outcome = desk.start_preparing(order.id, &Actor::kitchen("ana")).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod builder;
pub mod order_ops;
pub mod shift_ops;
pub mod stats_ops;
pub mod transition_ops;


pub use builder::OrderDeskBuilder;
pub use transition_ops::TransitionOutcome;

use crate::{
    engine::{CategoryPolicy, RouteEstimator},
    store::{OrderStore, SqliteStore},
};

/// Coordinates transitions, shifts and queries over an [`OrderStore`].
pub struct OrderDesk<S: OrderStore = SqliteStore> {
    pub(crate) store: Arc<S>,
    pub(crate) estimator: Arc<dyn RouteEstimator>,
    pub(crate) category_policy: Arc<dyn CategoryPolicy>,
}

impl<S: OrderStore> OrderDesk<S> {
    pub(crate) fn new(
        store: Arc<S>,
        estimator: Arc<dyn RouteEstimator>,
        category_policy: Arc<dyn CategoryPolicy>,
    ) -> Self {
        Self {
            store,
            estimator,
            category_policy,
        }
    }

    /// The underlying store, shared with projectors.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn category_policy(&self) -> &Arc<dyn CategoryPolicy> {
        &self.category_policy
    }
}

impl<S: OrderStore> Clone for OrderDesk<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            estimator: Arc::clone(&self.estimator),
            category_policy: Arc::clone(&self.category_policy),
        }
    }
}
