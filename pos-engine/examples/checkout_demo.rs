//! End-to-end checkout walkthrough
//!
//! Builds a cart with a customized pizza and a couple of drinks, confirms
//! it into an order, then walks the order through its lifecycle.
//!
//! ```bash
//! cargo run --example checkout_demo
//! ```

use anyhow::Result;
use pos_engine::{Config, PosEngine};
use shared::models::{Category, Product, default_extra_ingredients, default_pizza_sizes};
use shared::order::OrderStatus;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let mut config = Config::from_env();
    pos_engine::init_logger_with_file(Some(config.log_level.as_str()), None);

    // Keep the demo self-contained: state lives in a throwaway directory
    let data_dir = tempfile::tempdir()?;
    config.data_dir = data_dir.path().display().to_string();

    let mut engine = PosEngine::open(&config)?;
    let currency = engine.settings.currency.clone();

    engine.orders.subscribe(|event| {
        tracing::info!(?event, "order event");
    });

    // Catalog slice for the demo
    let margherita = Product::configurable(
        1,
        "Margherita",
        12.90,
        Category::Pizza,
        default_pizza_sizes(),
        default_extra_ingredients(),
    );
    let cola = Product::simple(19, "Cola", 1.80, Category::ColdDrinks);

    // Build the cart: a large Margherita with extra mozzarella, two colas
    engine.cart.add_product(&margherita);
    engine.cart.change_size(0, "40cm");
    engine.cart.add_ingredient(0, 1);
    engine.cart.add_product(&cola);
    engine.cart.change_quantity(1, 1);

    let summary = engine.cart.summary();
    tracing::info!(
        items = summary.item_count,
        subtotal = summary.subtotal,
        tax = summary.tax,
        total = summary.total,
        "cart ready"
    );

    // Confirm and walk the lifecycle to completion
    let order = engine.confirm_cart(Some("Table 4".to_string()))?;
    println!(
        "Order #{} confirmed for {}: {}{:.2}",
        order.id, order.customer, currency, order.total
    );

    for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
        engine.orders.update_status(order.id, status)?;
    }

    let stats = engine.orders.stats();
    println!(
        "{} order(s), revenue {}{:.2}",
        stats.total, currency, stats.total_revenue
    );
    Ok(())
}
