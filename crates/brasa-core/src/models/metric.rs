//! Production metric facts.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// How long an order spent in the kitchen.
///
/// Written once per order, in the same transaction that marks it ready.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionMetric {
    pub id: u64,

    pub order_id: u64,

    /// Kitchen staff who marked the order ready
    pub pizzaiolo_id: String,

    pub prep_seconds: i64,

    pub started_at: Timestamp,

    pub finished_at: Timestamp,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A metric row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductionMetric {
    pub order_id: u64,
    pub pizzaiolo_id: String,
    pub prep_seconds: i64,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub category: Option<String>,
}
