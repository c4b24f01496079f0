//! Order status lifecycle

use serde::{Deserialize, Serialize};

/// Order status
///
/// Forward path: `Pending → Confirmed → Preparing → Ready → Completed`,
/// with `Cancelled` reachable from any non-terminal state. `Completed`
/// and `Cancelled` are terminal: once there, no further transition or
/// item edit is permitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether this status admits no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        if self.is_terminal() {
            return false;
        }
        match next {
            Cancelled => true,
            Confirmed => self == Pending,
            Preparing => self == Confirmed,
            Ready => self == Preparing,
            Completed => self == Ready,
            Pending => false,
        }
    }
}
