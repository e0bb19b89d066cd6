//! Order lifecycle statuses and staff roles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of order statuses.
///
/// This is the only representation of a status inside the crate; text
/// forms exist solely at the storage and CLI boundaries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by the customer, waiting for the kitchen
    #[default]
    #[serde(alias = "Pendente", alias = "pendente")]
    Pending,

    /// Claimed by a pizzaiolo and in the oven
    #[serde(alias = "Em preparo", alias = "em preparo")]
    Preparing,

    /// Out of the kitchen, waiting for a driver
    #[serde(alias = "Pronto", alias = "pronto")]
    Ready,

    /// Claimed by a driver and on the road
    #[serde(alias = "Em rota de entrega", alias = "em rota de entrega")]
    OutForDelivery,

    /// Handed to the customer
    #[serde(alias = "Entregue", alias = "entregue")]
    Delivered,

    /// Withdrawn by an administrator
    #[serde(alias = "Cancelado", alias = "cancelado")]
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Position along the lifecycle. Cancelled sits outside the sequence.
    pub fn stage(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Preparing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::OutForDelivery => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }

    /// The single forward step from this status, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Whether the order has left the kitchen (ready or any later stage).
    pub fn is_ready_or_later(&self) -> bool {
        self.stage().is_some_and(|s| s >= 2)
    }

    /// Get status with a label suited to operator screens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use brasa_core::models::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::OutForDelivery.label(), "Out for delivery");
    /// assert_eq!(OrderStatus::Pending.label(), "Pending");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Parses canonical names as well as the mixed-case Portuguese labels
    /// found in older rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace(['-', ' '], "_");
        match normalized.as_str() {
            "pending" | "pendente" => Ok(OrderStatus::Pending),
            "preparing" | "em_preparo" => Ok(OrderStatus::Preparing),
            "ready" | "pronto" => Ok(OrderStatus::Ready),
            "out_for_delivery" | "em_rota_de_entrega" => Ok(OrderStatus::OutForDelivery),
            "delivered" | "entregue" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" | "cancelado" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff role of the person acting on an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees every order, never moves one
    #[serde(alias = "gerente")]
    Manager,

    /// Pizzaiolo: pending → preparing → ready
    #[serde(alias = "pizzaiolo")]
    Kitchen,

    /// Entregador: ready → out for delivery → delivered
    #[serde(alias = "entregador")]
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Kitchen => "kitchen",
            Role::Driver => "driver",
        }
    }

    /// Statuses that make up this role's working queue.
    pub fn visible_statuses(&self) -> &'static [OrderStatus] {
        match self {
            Role::Manager => &OrderStatus::ALL,
            Role::Kitchen => &[OrderStatus::Pending, OrderStatus::Preparing],
            Role::Driver => &[OrderStatus::Ready, OrderStatus::OutForDelivery],
        }
    }

    pub fn sees(&self, status: OrderStatus) -> bool {
        self.visible_statuses().contains(&status)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" | "gerente" => Ok(Role::Manager),
            "kitchen" | "pizzaiolo" => Ok(Role::Kitchen),
            "driver" | "entregador" => Ok(Role::Driver),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The staff member requesting a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn kitchen(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Kitchen)
    }

    pub fn driver(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Driver)
    }
}
