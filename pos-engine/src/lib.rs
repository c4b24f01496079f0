//! Vectis POS Order Engine
//!
//! Core engine behind the Vectis point-of-sale front end: cart assembly,
//! decimal-safe pricing, order confirmation and order history. State is
//! persisted as JSON blobs in an embedded redb store; the presentation
//! layer only calls into this crate and renders its outputs.
//!
//! # Module structure
//!
//! ```text
//! pos-engine/src/
//! ├── core/     # Configuration
//! ├── cart/     # In-progress order line items
//! ├── pricing/  # Decimal-safe price derivation
//! ├── orders/   # Confirmed orders: manager, events, errors
//! ├── storage   # redb JSON blob store
//! └── utils/    # Logging setup
//! ```

pub mod cart;
pub mod core;
pub mod orders;
pub mod pricing;
pub mod storage;
pub mod utils;

// Re-export public types
pub use cart::{CartStore, CartSummary};
pub use core::Config;
pub use orders::{OrderError, OrderEvent, OrderResult, OrderStats, OrdersManager};
pub use pricing::OrderTotals;
pub use storage::{Storage, StorageError};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

use shared::models::Settings;
use shared::order::Order;
use std::path::Path;
use std::sync::Arc;

/// Database file name inside the configured data directory
const DB_FILE: &str = "pos.redb";

/// Top-level composition root
///
/// Owns construction and wiring of the engine services. Consumers receive
/// handles from here instead of reaching for lazily-initialized globals,
/// so lifecycle and configuration stay in one place.
pub struct PosEngine {
    pub settings: Settings,
    pub cart: CartStore,
    pub orders: Arc<OrdersManager>,
}

impl PosEngine {
    /// Open the engine against the configured data directory.
    ///
    /// Restores the persisted settings (seeding them from the config on
    /// first run), the in-progress cart and the order history.
    pub fn open(config: &Config) -> OrderResult<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(StorageError::from)?;
        let storage = Storage::open(Path::new(&config.data_dir).join(DB_FILE))?;

        let settings = match storage.load_settings()? {
            Some(settings) => settings,
            None => {
                let settings = Settings {
                    tax_rate: config.tax_rate,
                    currency: config.currency.clone(),
                };
                if let Err(e) = storage.save_settings(&settings) {
                    tracing::error!(error = %e, "Failed to seed settings blob");
                }
                settings
            }
        };

        let cart = CartStore::with_storage(settings.tax_rate, storage.clone());
        let orders = Arc::new(OrdersManager::new(storage, settings.tax_rate));
        Ok(Self {
            settings,
            cart,
            orders,
        })
    }

    /// Confirm the current cart into an order, then clear the cart.
    ///
    /// On error the cart is left untouched so the user can correct and
    /// retry.
    pub fn confirm_cart(&mut self, customer: Option<String>) -> OrderResult<Order> {
        let order = self.orders.confirm(self.cart.items(), customer)?;
        self.cart.clear();
        Ok(order)
    }
}
