//! Core library for the Brasa pizzeria operations dashboard.
//!
//! Orders move through a fixed lifecycle, each step owned by one staff role:
//!
//! ```text
//! pending ──kitchen──▶ preparing ──kitchen──▶ ready ──driver──▶ out_for_delivery ──driver──▶ delivered
//! ```
//!
//! The crate is layered so each piece can be used and tested on its own:
//!
//! - [`models`]: orders, statuses, roles, shifts, metrics and filters
//! - [`engine`]: the pure transition rules plus category and route policies
//! - [`store`]: the [`OrderStore`] seam and its SQLite implementation
//! - [`desk`]: [`OrderDesk`], which turns planned side effects into one
//!   conditional store write
//! - [`projector`]: realtime per-role queues fed by the store's change events
//! - [`display`]: markdown formatting for the terminal renderer
//!
//! # Quick Start
//!
//! ```rust
//! use brasa_core::{models::{Actor, LineItem, NewOrder, Role}, OrderDeskBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let desk = OrderDeskBuilder::new()
//!     .with_database_path(Some("brasa-test.db"))
//!     .build()
//!     .await?;
//!
//! let order = desk
//!     .create_order(NewOrder {
//!         customer_name: "Caio".to_string(),
//!         customer_phone: "11 97777-6666".to_string(),
//!         items: vec![LineItem::new(1, "Calabresa")],
//!         total_cents: 4200,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! desk.start_preparing(order.id, &Actor::kitchen("ana")).await?;
//! desk.mark_ready(order.id, &Actor::kitchen("ana")).await?;
//!
//! for order in desk.queue(Role::Driver, None).await? {
//!     println!("{order}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod desk;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod projector;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use desk::{OrderDesk, OrderDeskBuilder, TransitionOutcome};
pub use display::{CreateResult, OperationStatus, Orders, Shifts};
pub use error::{BrasaError, Result};
pub use models::{
    Actor, LineItem, NewOrder, Order, OrderFilter, OrderStatus, Role, ShiftClaim, TimeTrack,
};
pub use projector::{Projector, ProjectorHandle, QueueView, Toast};
pub use store::{ChangeEvent, OrderStore, SqliteStore};
