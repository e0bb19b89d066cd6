//! Filter types for querying orders, shifts and metrics.

use jiff::Timestamp;

use super::{OrderStatus, Role};

/// Sort order for order queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    /// Oldest first, so the next order to serve is on top
    #[default]
    CreatedAsc,

    /// Newest first
    CreatedDesc,

    /// Most recently finished route first
    RouteEndedDesc,
}

/// Filter options for querying orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Match any of these statuses; empty means all
    pub statuses: Vec<OrderStatus>,

    pub pizzaiolo_id: Option<String>,

    pub entregador_id: Option<String>,

    /// Creation time range, `created_after` inclusive and `created_before`
    /// exclusive
    pub created_after: Option<Timestamp>,
    pub created_before: Option<Timestamp>,

    pub order_by: OrderSort,

    pub limit: Option<u32>,
}

impl OrderFilter {
    /// The working queue for a role.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use brasa_core::models::{OrderFilter, OrderStatus, Role};
    ///
    /// let filter = OrderFilter::for_role(Role::Driver);
    /// assert_eq!(
    ///     filter.statuses,
    ///     vec![OrderStatus::Ready, OrderStatus::OutForDelivery]
    /// );
    /// ```
    pub fn for_role(role: Role) -> Self {
        Self {
            statuses: role.visible_statuses().to_vec(),
            ..Default::default()
        }
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn created_between(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.created_after = Some(start);
        self.created_before = Some(end);
        self
    }
}

/// Filter options for querying production metrics.
#[derive(Debug, Clone, Default)]
pub struct MetricFilter {
    pub pizzaiolo_id: Option<String>,

    /// Range on `finished_at`, start inclusive and end exclusive
    pub finished_after: Option<Timestamp>,
    pub finished_before: Option<Timestamp>,
}

/// Filter options for querying shifts.
#[derive(Debug, Clone, Default)]
pub struct ShiftFilter {
    pub user_id: Option<String>,

    /// Only shifts without an exit timestamp
    pub open_only: bool,

    pub limit: Option<u32>,
}
