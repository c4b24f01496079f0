//! Cart line-item types

use crate::models::{ExtraIngredient, Product, ProductKind, SizeOption};
use serde::{Deserialize, Serialize};

/// Selected extra on a configurable line item
///
/// Snapshot of the catalog entry plus a quantity. Quantity is always
/// >= 1; an entry whose quantity would reach zero is removed from the
/// list instead of being stored at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedIngredient {
    pub id: i64,
    pub name: String,
    /// Price per unit, copied from the catalog at selection time
    pub price: f64,
    pub quantity: i32,
}

impl SelectedIngredient {
    /// Quantity-1 selection of a catalog ingredient
    pub fn from_catalog(ingredient: &ExtraIngredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            price: ingredient.price,
            quantity: 1,
        }
    }
}

/// Per-row configuration state
///
/// Mirrors [`ProductKind`]: only rows built from configurable products
/// carry size and ingredient state, so size/ingredient operations cannot
/// be applied to a plain row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemConfig {
    Simple,
    Configurable {
        selected_size: SizeOption,
        selected_ingredients: Vec<SelectedIngredient>,
        /// Size set captured from the catalog when the row was created
        available_sizes: Vec<SizeOption>,
        available_ingredients: Vec<ExtraIngredient>,
    },
}

/// One row of an order: a product at a given configuration and quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product_id: i64,
    pub name: String,
    /// Base price before size multiplier and extras
    pub base_price: f64,
    /// Always >= 1; the store deletes the row instead of keeping zero
    pub quantity: i32,
    #[serde(flatten)]
    pub config: ItemConfig,
}

impl LineItem {
    /// Build a quantity-1 row from a catalog product.
    ///
    /// Configurable products start at their first available size with no
    /// extras. A configurable product without any sizes degrades to a
    /// plain row.
    pub fn from_product(product: &Product) -> Self {
        let config = match &product.kind {
            ProductKind::Simple => ItemConfig::Simple,
            ProductKind::Configurable {
                available_sizes,
                available_ingredients,
            } => match available_sizes.first() {
                Some(size) => ItemConfig::Configurable {
                    selected_size: size.clone(),
                    selected_ingredients: Vec::new(),
                    available_sizes: available_sizes.clone(),
                    available_ingredients: available_ingredients.clone(),
                },
                None => ItemConfig::Simple,
            },
        };
        Self {
            product_id: product.id,
            name: product.name.clone(),
            base_price: product.price,
            quantity: 1,
            config,
        }
    }

    pub fn is_configurable(&self) -> bool {
        matches!(self.config, ItemConfig::Configurable { .. })
    }

    /// Whether this row is the unmodified variant of its product.
    ///
    /// Plain rows always are; configurable rows only at their default
    /// (first) size with no extras. Repeated catalog adds merge into the
    /// plain row rather than appending a duplicate.
    pub fn is_plain(&self) -> bool {
        match &self.config {
            ItemConfig::Simple => true,
            ItemConfig::Configurable {
                selected_size,
                selected_ingredients,
                available_sizes,
                ..
            } => {
                selected_ingredients.is_empty()
                    && available_sizes
                        .first()
                        .is_some_and(|size| size.id == selected_size.id)
            }
        }
    }
}
