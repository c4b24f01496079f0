//! Confirmed order record

use super::status::OrderStatus;
use super::types::LineItem;
use serde::{Deserialize, Serialize};

/// Customer label used when no name is captured at confirmation
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// Confirmed order: a deep snapshot of a cart plus lifecycle status
///
/// `subtotal`/`tax`/`total` are derived from `items` and only ever
/// recomputed together; they are never mutated independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Monotonic id, assigned at confirmation and never reused
    pub id: u64,
    /// Creation timestamp (unix millis)
    pub created_at: i64,
    pub customer: String,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Partial order update; absent fields are left unchanged
///
/// Replacing `items` forces a recompute of all three totals together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}
