//! Order model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// A customer purchase moving through preparation and delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique identifier for the order
    pub id: u64,

    /// Sequential number shown to staff and customers
    pub number: u32,

    pub customer_name: String,

    pub customer_phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Itemized contents, first item drives the category label
    pub items: Vec<LineItem>,

    /// Order total in cents
    pub total_cents: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Current lifecycle status
    pub status: OrderStatus,

    /// Kitchen staff who claimed the order (set on pending → preparing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pizzaiolo_id: Option<String>,

    /// Driver who claimed the order (set on ready → out for delivery)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entregador_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_started_at: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_started_at: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_ended_at: Option<Timestamp>,

    /// Estimated route length in kilometres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    /// Estimated route duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<f64>,

    /// Driver's last known position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_position: Option<Coordinates>,

    /// Timestamp when the order was placed (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the order was last written (UTC)
    pub updated_at: Timestamp,
}

impl Order {
    /// Minutes between route start and route end, when both are known.
    pub fn route_minutes(&self) -> Option<f64> {
        let start = self.route_started_at?;
        let end = self.route_ended_at?;
        let seconds = end.as_second() - start.as_second();
        Some(seconds as f64 / 60.0)
    }
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    #[serde(default = "default_quantity", alias = "quantidade")]
    pub quantity: u32,

    #[serde(alias = "nome")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "tamanho")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "categoria")]
    pub category: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            size: None,
            category: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl std::str::FromStr for LineItem {
    type Err = String;

    /// Parses `"2x Margherita"`, `"Calabresa"` or
    /// `"1x Portuguesa:large:classic"` (size and category optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let head = parts.next().unwrap_or_default();
        if head.is_empty() {
            return Err("Item cannot be empty".to_string());
        }

        let (quantity, name) = match head.split_once(|c: char| c == 'x' || c == 'X') {
            Some((qty, rest)) if is_quantity(qty.trim()) => {
                let quantity = qty
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid quantity '{qty}': {e}"))?;
                (quantity, rest.trim())
            }
            _ => (1, head),
        };

        if quantity == 0 {
            return Err("Quantity must be at least 1".to_string());
        }
        if name.is_empty() {
            return Err(format!("Item '{s}' has no name"));
        }

        let size = parts.next().filter(|p| !p.is_empty()).map(String::from);
        let category = parts.next().filter(|p| !p.is_empty()).map(String::from);

        Ok(Self {
            quantity,
            name: name.to_string(),
            size,
            category,
        })
    }
}

fn is_quantity(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Estimated route attached when a driver takes an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub estimated_minutes: f64,
    pub driver_position: Coordinates,
}

/// Fields for an order entering the system.
///
/// Orders always start as [`OrderStatus::Pending`]; the store assigns the id,
/// display number and timestamps.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
    pub total_cents: i64,
    pub payment_method: Option<String>,
}
