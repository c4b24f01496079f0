//! Order change notifications

use shared::order::{Order, OrderStatus};

/// Emitted to observers strictly after an order mutation has been
/// committed, so callbacks never observe half-applied state.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    Created(Order),
    Updated(Order),
    StatusChanged {
        id: u64,
        from: OrderStatus,
        to: OrderStatus,
    },
    Deleted(Order),
    Cleared,
}
