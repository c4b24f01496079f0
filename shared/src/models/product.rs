//! Product Model

use serde::{Deserialize, Serialize};

/// Menu category tag
///
/// `Pizza` and `WhitePizza` are the configurable categories: their
/// products carry a size selection and optional extra ingredients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Pizza,
    WhitePizza,
    Salads,
    Desserts,
    HotDrinks,
    ColdDrinks,
    Alcohol,
}

impl Category {
    /// Whether products in this category support size/ingredient customization
    pub fn is_configurable(self) -> bool {
        matches!(self, Category::Pizza | Category::WhitePizza)
    }
}

/// Size choice for a configurable product
///
/// The multiplier scales the product base price (1.0 = standard,
/// 1.5 = large).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    pub id: String,
    /// Display label
    pub name: String,
    pub multiplier: f64,
}

/// Paid extra available on a configurable product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtraIngredient {
    pub id: i64,
    pub name: String,
    /// Price per unit of the ingredient
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Product shape: plain or size/ingredient configurable
///
/// Size and ingredient operations are only expressible on the
/// `Configurable` variant; a plain product cannot carry them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    Simple,
    Configurable {
        /// The first entry is the default size a new cart row starts at
        available_sizes: Vec<SizeOption>,
        available_ingredients: Vec<ExtraIngredient>,
    },
}

/// Product entity (read-only catalog record)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Base price before size multiplier and extras
    pub price: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub kind: ProductKind,
}

impl Product {
    /// Build a plain catalog product
    pub fn simple(id: i64, name: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category,
            image: None,
            kind: ProductKind::Simple,
        }
    }

    /// Build a configurable catalog product with its size and ingredient sets
    pub fn configurable(
        id: i64,
        name: impl Into<String>,
        price: f64,
        category: Category,
        available_sizes: Vec<SizeOption>,
        available_ingredients: Vec<ExtraIngredient>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category,
            image: None,
            kind: ProductKind::Configurable {
                available_sizes,
                available_ingredients,
            },
        }
    }

    pub fn is_configurable(&self) -> bool {
        matches!(self.kind, ProductKind::Configurable { .. })
    }
}

/// Default size set for the pizza categories (standard size first)
pub fn default_pizza_sizes() -> Vec<SizeOption> {
    vec![
        SizeOption {
            id: "30cm".to_string(),
            name: "30cm (Standard)".to_string(),
            multiplier: 1.0,
        },
        SizeOption {
            id: "40cm".to_string(),
            name: "40cm (Large)".to_string(),
            multiplier: 1.5,
        },
    ]
}

/// Default extra-ingredient catalog for the pizza categories
pub fn default_extra_ingredients() -> Vec<ExtraIngredient> {
    let entries = [
        (1, "Extra Mozzarella", 2.50),
        (2, "Pepperoni", 3.00),
        (3, "Mushrooms", 2.00),
        (4, "Bell Peppers", 2.00),
        (5, "Red Onions", 1.50),
        (6, "Olives", 2.50),
        (7, "Tomatoes", 2.00),
        (8, "Basil", 1.50),
        (9, "Prosciutto", 4.00),
        (10, "Salami", 3.50),
        (11, "Arugula", 2.00),
        (12, "Parmesan", 3.00),
    ];
    entries
        .into_iter()
        .map(|(id, name, price)| ExtraIngredient {
            id,
            name: name.to_string(),
            price,
            image: None,
        })
        .collect()
}
