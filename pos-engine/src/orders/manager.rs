//! OrdersManager - confirmation, lifecycle and history of orders
//!
//! # Confirmation flow
//!
//! ```text
//! confirm(items, customer)
//!     ├─ 1. Acquire the in-flight guard (reject re-entrant confirms)
//!     ├─ 2. Reject empty carts
//!     ├─ 3. Assign the next monotonic id
//!     ├─ 4. Deep-snapshot the items and compute totals
//!     ├─ 5. Prepend to the history (newest first)
//!     ├─ 6. Persist (fire-and-forget)
//!     └─ 7. Notify observers
//! ```
//!
//! The guard stays held through observer notification, so a duplicate
//! submit arriving from a callback is rejected instead of minting a
//! second order.

use crate::orders::{OrderError, OrderEvent, OrderResult};
use crate::pricing;
use crate::storage::Storage;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{LineItem, Order, OrderStatus, OrderUpdate, WALK_IN_CUSTOMER};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Observer registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&OrderEvent) + Send + Sync>;

struct OrdersState {
    /// Newest first
    orders: Vec<Order>,
    /// Next id to assign; only ever increments, so deletion never frees an id
    next_order_id: u64,
}

/// Aggregate figures over the order history
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Revenue over completed orders
    pub total_revenue: f64,
    /// Mean total over completed orders
    pub average_order_value: f64,
}

/// RAII reset for the confirm in-flight flag
struct ConfirmGuard<'a>(&'a AtomicBool);

impl Drop for ConfirmGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Order store: confirmation, status lifecycle and history queries
///
/// Methods take `&self`; state lives behind a lock so the manager can be
/// shared via `Arc` between the cart screen and the history screen.
pub struct OrdersManager {
    storage: Storage,
    tax_rate: f64,
    state: RwLock<OrdersState>,
    /// Confirm critical section; held through observer notification
    confirm_in_flight: AtomicBool,
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    listener_seq: AtomicU64,
}

impl OrdersManager {
    /// Restore the manager from storage.
    ///
    /// The id counter resumes at `max(existing ids) + 1` (0 for an empty
    /// history) so ids survive restarts without ever being reissued. An
    /// unreadable history degrades to empty rather than failing startup.
    pub fn new(storage: Storage, tax_rate: f64) -> Self {
        let mut orders = storage.load_orders().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load persisted orders, starting empty");
            Vec::new()
        });
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let next_order_id = orders.iter().map(|o| o.id + 1).max().unwrap_or(0);
        tracing::info!(
            orders = orders.len(),
            next_order_id,
            "OrdersManager restored"
        );

        Self {
            storage,
            tax_rate,
            state: RwLock::new(OrdersState {
                orders,
                next_order_id,
            }),
            confirm_in_flight: AtomicBool::new(false),
            listeners: RwLock::new(Vec::new()),
            listener_seq: AtomicU64::new(0),
        }
    }

    // ========== Confirmation ==========

    /// Confirm a cart snapshot into a new order.
    ///
    /// Fails with `EmptyCart` on an empty item list, leaving the history
    /// untouched, and with `ConfirmInFlight` when invoked while another
    /// confirmation is still executing. The caller clears its cart only
    /// after a successful return.
    pub fn confirm(&self, items: &[LineItem], customer: Option<String>) -> OrderResult<Order> {
        if self
            .confirm_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(OrderError::ConfirmInFlight);
        }
        let _guard = ConfirmGuard(&self.confirm_in_flight);

        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let totals = pricing::order_totals(items, self.tax_rate);
        let order = {
            let mut state = self.state.write();
            let order = Order {
                id: state.next_order_id,
                created_at: Utc::now().timestamp_millis(),
                customer: customer.unwrap_or_else(|| WALK_IN_CUSTOMER.to_string()),
                status: OrderStatus::Confirmed,
                items: items.to_vec(),
                subtotal: totals.subtotal,
                tax: totals.tax,
                total: totals.total,
            };
            state.next_order_id += 1;
            state.orders.insert(0, order.clone());
            self.persist(&state.orders);
            order
        };

        self.emit(&OrderEvent::Created(order.clone()));
        Ok(order)
    }

    // ========== Mutation ==========

    /// Apply a partial update to an order.
    ///
    /// Terminal orders reject item edits and status changes. Replacing
    /// `items` recomputes subtotal/tax/total together; the three are
    /// never partially refreshed.
    pub fn update_order(&self, id: u64, update: OrderUpdate) -> OrderResult<Order> {
        let order = {
            let mut state = self.state.write();
            let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
                return Err(OrderError::NotFound(id));
            };
            if order.status.is_terminal() && (update.items.is_some() || update.status.is_some()) {
                return Err(OrderError::TerminalOrder(id));
            }
            if let Some(status) = update.status
                && !order.status.can_transition_to(status)
            {
                return Err(OrderError::InvalidTransition {
                    from: order.status,
                    to: status,
                });
            }

            if let Some(customer) = update.customer {
                order.customer = customer;
            }
            if let Some(status) = update.status {
                order.status = status;
            }
            if let Some(items) = update.items {
                let totals = pricing::order_totals(&items, self.tax_rate);
                order.items = items;
                order.subtotal = totals.subtotal;
                order.tax = totals.tax;
                order.total = totals.total;
            }

            let order = order.clone();
            self.persist(&state.orders);
            order
        };

        self.emit(&OrderEvent::Updated(order.clone()));
        Ok(order)
    }

    /// Move an order along its status lifecycle
    pub fn update_status(&self, id: u64, status: OrderStatus) -> OrderResult<Order> {
        let (from, order) = {
            let mut state = self.state.write();
            let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
                return Err(OrderError::NotFound(id));
            };
            let from = order.status;
            if !from.can_transition_to(status) {
                return Err(OrderError::InvalidTransition { from, to: status });
            }
            order.status = status;
            let order = order.clone();
            self.persist(&state.orders);
            (from, order)
        };

        self.emit(&OrderEvent::StatusChanged {
            id,
            from,
            to: status,
        });
        Ok(order)
    }

    /// Delete an order. Returns false for an unknown id. The id is never
    /// reassigned to a later order.
    pub fn delete(&self, id: u64) -> bool {
        let deleted = {
            let mut state = self.state.write();
            let Some(pos) = state.orders.iter().position(|o| o.id == id) else {
                return false;
            };
            let deleted = state.orders.remove(pos);
            self.persist(&state.orders);
            deleted
        };

        self.emit(&OrderEvent::Deleted(deleted));
        true
    }

    /// Drop the entire history (reset hook).
    ///
    /// The id counter is left alone: issued ids are never reused, even
    /// across a reset.
    pub fn clear_all(&self) {
        {
            let mut state = self.state.write();
            state.orders.clear();
            self.persist(&state.orders);
        }
        self.emit(&OrderEvent::Cleared);
    }

    // ========== Queries ==========

    pub fn get(&self, id: u64) -> Option<Order> {
        self.state.read().orders.iter().find(|o| o.id == id).cloned()
    }

    /// All orders, newest first
    pub fn all(&self) -> Vec<Order> {
        self.state.read().orders.clone()
    }

    pub fn by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.state
            .read()
            .orders
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Orders created within `[start_ms, end_ms]` (unix millis, inclusive)
    pub fn by_date_range(&self, start_ms: i64, end_ms: i64) -> Vec<Order> {
        self.state
            .read()
            .orders
            .iter()
            .filter(|o| o.created_at >= start_ms && o.created_at <= end_ms)
            .cloned()
            .collect()
    }

    /// Case-insensitive search over order id, customer and item names
    pub fn search(&self, query: &str) -> Vec<Order> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.all();
        }
        self.state
            .read()
            .orders
            .iter()
            .filter(|o| {
                o.id.to_string().contains(&query)
                    || o.customer.to_lowercase().contains(&query)
                    || o.items
                        .iter()
                        .any(|item| item.name.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Aggregate counts and revenue over the history
    pub fn stats(&self) -> OrderStats {
        let state = self.state.read();
        let mut stats = OrderStats {
            total: state.orders.len(),
            ..OrderStats::default()
        };

        let mut revenue = Decimal::ZERO;
        for order in &state.orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Ready => stats.ready += 1,
                OrderStatus::Completed => {
                    stats.completed += 1;
                    revenue += pricing::to_decimal(order.total);
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
        }

        stats.total_revenue = pricing::to_f64(revenue);
        if stats.completed > 0 {
            stats.average_order_value = pricing::to_f64(revenue / Decimal::from(stats.completed as u64));
        }
        stats
    }

    // ========== Observers ==========

    /// Register a callback invoked after every committed order mutation
    pub fn subscribe(&self, listener: impl Fn(&OrderEvent) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.listener_seq.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.write().retain(|(lid, _)| *lid != id);
    }

    /// Fire-and-forget persistence; the in-memory state stays authoritative
    fn persist(&self, orders: &[Order]) {
        if let Err(e) = self.storage.save_orders(orders) {
            tracing::error!(error = %e, "Failed to persist orders");
        }
    }

    /// Notify observers. Called after the state lock is released so
    /// callbacks can safely re-enter the read APIs.
    fn emit(&self, event: &OrderEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests;
