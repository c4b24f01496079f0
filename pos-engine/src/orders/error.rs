use crate::storage::StorageError;
use shared::order::OrderStatus;
use thiserror::Error;

/// Order-level errors
///
/// Cart index misses are deliberately silent no-ops and never reach this
/// enum; these errors cover externally supplied order ids and lifecycle
/// violations. None is fatal: every one is recoverable by retrying the
/// action with corrected input.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("order not found: {0}")]
    NotFound(u64),

    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("order {0} is in a terminal state")]
    TerminalOrder(u64),

    #[error("order confirmation already in progress")]
    ConfirmInFlight,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type OrderResult<T> = Result<T, OrderError>;
