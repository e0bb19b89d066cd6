//! Data models for orders, shifts and production metrics.
//!
//! This module contains the domain types shared by every layer of the crate.
//! Display implementations live in [`crate::display`] so that presentation
//! stays separate from the data structures.
//!
//! # Status vocabulary
//!
//! [`OrderStatus`] is the single closed set of lifecycle stages. Text forms
//! are produced with [`OrderStatus::as_str`] and parsed with
//! [`std::str::FromStr`], which also understands the mixed-case Portuguese
//! labels written by earlier versions of the dashboard:
//!
//! ```rust
//! use brasa_core::models::OrderStatus;
//!
//! assert_eq!("Em preparo".parse::<OrderStatus>(), Ok(OrderStatus::Preparing));
//! assert_eq!("out-for-delivery".parse::<OrderStatus>(), Ok(OrderStatus::OutForDelivery));
//! assert_eq!(OrderStatus::OutForDelivery.as_str(), "out_for_delivery");
//! ```

pub mod filters;
pub mod metric;
pub mod order;
pub mod shift;
pub mod stats;
pub mod status;
pub mod time;
pub mod write;

#[cfg(test)]
mod tests;

pub use filters::{MetricFilter, OrderFilter, OrderSort, ShiftFilter};
pub use metric::{NewProductionMetric, ProductionMetric};
pub use order::{Coordinates, LineItem, NewOrder, Order, RouteEstimate};
pub use shift::{ShiftClaim, TimeTrack};
pub use stats::{
    DeliveryHistory, DeliveryStats, OrdersOverview, PerformanceRanking, ProductionStats,
    StaffPerformance,
};
pub use status::{Actor, OrderStatus, Role};
pub use write::{OrderPatch, TransitionWrite};
