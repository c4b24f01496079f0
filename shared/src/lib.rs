//! Shared types for the Vectis POS engine
//!
//! Domain model used across the workspace: catalog products, cart line
//! items, confirmed orders and the persisted settings blob.

pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Category, ExtraIngredient, Product, ProductKind, Settings, SizeOption};
pub use order::{LineItem, Order, OrderStatus, OrderUpdate};
