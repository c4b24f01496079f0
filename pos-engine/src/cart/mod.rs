//! In-progress order: line items and their mutations
//!
//! [`CartStore`] owns the rows of the order currently being built.
//! Mutation operations never fail: indices or ids that no longer exist
//! are silent no-ops, tolerating a UI whose rendered state can lag behind
//! the store. Observers are notified synchronously, strictly after a
//! mutation has been fully applied and persisted, so they only ever see
//! rows with matching totals.

use crate::pricing;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use shared::models::Product;
use shared::order::{ItemConfig, LineItem, SelectedIngredient};

/// Cart state handed to observers after every mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    /// Total units across all rows
    pub item_count: i32,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Observer registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&CartSummary) + Send>;

/// Line-item store for the order being built
pub struct CartStore {
    items: Vec<LineItem>,
    tax_rate: f64,
    storage: Option<Storage>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl CartStore {
    /// Create an empty cart with no persistence
    pub fn new(tax_rate: f64) -> Self {
        Self {
            items: Vec::new(),
            tax_rate,
            storage: None,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Create a cart bound to a storage handle, restoring any persisted rows
    pub fn with_storage(tax_rate: f64, storage: Storage) -> Self {
        let items = storage.load_cart().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load persisted cart, starting empty");
            Vec::new()
        });
        Self {
            items,
            tax_rate,
            storage: Some(storage),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    // ========== Queries ==========

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all rows
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Consistent snapshot of the rows plus their derived totals
    pub fn summary(&self) -> CartSummary {
        let totals = pricing::order_totals(&self.items, self.tax_rate);
        CartSummary {
            items: self.items.clone(),
            item_count: self.item_count(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
        }
    }

    // ========== Mutations ==========

    /// Add a catalog product to the cart.
    ///
    /// Merges into an existing row when that row is the plain variant of
    /// the same product (quantity + 1); otherwise appends a fresh
    /// quantity-1 row. Configurable products start at their first size
    /// with no extras.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id && item.is_plain())
        {
            existing.quantity += 1;
        } else {
            let item = LineItem::from_product(product);
            if product.is_configurable() && !item.is_configurable() {
                tracing::warn!(
                    product_id = product.id,
                    "Configurable product has no sizes, adding as plain row"
                );
            }
            self.items.push(item);
        }
        self.commit();
    }

    /// Remove the row at `index`; out-of-range is a no-op
    pub fn remove_line_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        self.commit();
    }

    /// Stepper quantity change (+1/-1).
    ///
    /// Dropping below 1 removes the row; a quantity of zero is never
    /// stored. Increasing has no upper bound.
    pub fn change_quantity(&mut self, index: usize, delta: i32) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let next = item.quantity + delta;
        if next < 1 {
            self.items.remove(index);
        } else {
            item.quantity = next;
        }
        self.commit();
    }

    /// Direct-entry quantity set; values below 1 clamp to 1.
    ///
    /// Deliberately different from [`Self::change_quantity`]: the numeric
    /// field keeps the row alive, the stepper deletes it on zero-crossing.
    pub fn set_quantity(&mut self, index: usize, value: i32) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        item.quantity = value.max(1);
        self.commit();
    }

    /// Switch a configurable row to another of its available sizes.
    ///
    /// Replaces the selected size wholesale. No-op for plain rows and
    /// unknown size ids.
    pub fn change_size(&mut self, index: usize, size_id: &str) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let ItemConfig::Configurable {
            selected_size,
            available_sizes,
            ..
        } = &mut item.config
        else {
            return;
        };
        let Some(size) = available_sizes.iter().find(|s| s.id == size_id) else {
            return;
        };
        *selected_size = size.clone();
        self.commit();
    }

    /// Add one unit of an available extra to a configurable row.
    ///
    /// Repeat adds increment the existing entry instead of appending a
    /// duplicate. No-op for plain rows and ids outside the row's
    /// available-ingredient list.
    pub fn add_ingredient(&mut self, index: usize, ingredient_id: i64) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let ItemConfig::Configurable {
            selected_ingredients,
            available_ingredients,
            ..
        } = &mut item.config
        else {
            return;
        };
        if let Some(existing) = selected_ingredients
            .iter_mut()
            .find(|ing| ing.id == ingredient_id)
        {
            existing.quantity += 1;
        } else {
            let Some(ingredient) = available_ingredients
                .iter()
                .find(|ing| ing.id == ingredient_id)
            else {
                return;
            };
            selected_ingredients.push(SelectedIngredient::from_catalog(ingredient));
        }
        self.commit();
    }

    /// Remove an extra from a configurable row entirely
    pub fn remove_ingredient(&mut self, index: usize, ingredient_id: i64) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let ItemConfig::Configurable {
            selected_ingredients,
            ..
        } = &mut item.config
        else {
            return;
        };
        let Some(pos) = selected_ingredients
            .iter()
            .position(|ing| ing.id == ingredient_id)
        else {
            return;
        };
        selected_ingredients.remove(pos);
        self.commit();
    }

    /// Stepper change for an extra's quantity.
    ///
    /// Dropping below 1 removes the entry from the list, so zero-quantity
    /// extras never persist.
    pub fn change_ingredient_quantity(&mut self, index: usize, ingredient_id: i64, delta: i32) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let ItemConfig::Configurable {
            selected_ingredients,
            ..
        } = &mut item.config
        else {
            return;
        };
        let Some(pos) = selected_ingredients
            .iter()
            .position(|ing| ing.id == ingredient_id)
        else {
            return;
        };
        let next = selected_ingredients[pos].quantity + delta;
        if next < 1 {
            selected_ingredients.remove(pos);
        } else {
            selected_ingredients[pos].quantity = next;
        }
        self.commit();
    }

    /// Empty the cart unconditionally
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    // ========== Observers ==========

    /// Register a callback invoked after every applied mutation
    pub fn subscribe(&mut self, listener: impl Fn(&CartSummary) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    /// Persist and notify, strictly after the mutation is applied.
    ///
    /// Persistence is fire-and-forget: a failed write is logged and the
    /// in-memory state stays authoritative.
    fn commit(&mut self) {
        if let Some(storage) = &self.storage
            && let Err(e) = storage.save_cart(&self.items)
        {
            tracing::error!(error = %e, "Failed to persist cart");
        }
        let summary = self.summary();
        for (_, listener) in &self.listeners {
            listener(&summary);
        }
    }
}

#[cfg(test)]
mod tests;
