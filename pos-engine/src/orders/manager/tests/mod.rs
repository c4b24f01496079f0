
use super::*;
use shared::models::{Category, Product, default_extra_ingredients, default_pizza_sizes};

/// 21% VAT, the default deployment rate
const TAX_RATE: f64 = 0.21;

fn test_manager() -> OrdersManager {
    OrdersManager::new(Storage::open_in_memory().unwrap(), TAX_RATE)
}

fn plain_item(id: i64, name: &str, price: f64) -> LineItem {
    LineItem::from_product(&Product::simple(id, name, price, Category::ColdDrinks))
}

fn pizza_item() -> LineItem {
    LineItem::from_product(&Product::configurable(
        1,
        "Margherita",
        12.90,
        Category::Pizza,
        default_pizza_sizes(),
        default_extra_ingredients(),
    ))
}
