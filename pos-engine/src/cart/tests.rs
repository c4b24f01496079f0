use super::*;
use crate::pricing::{to_f64, unit_price};
use crate::storage::Storage;
use shared::models::{Category, Product, default_extra_ingredients, default_pizza_sizes};
use std::sync::{Arc, Mutex};

/// 21% VAT, the default deployment rate
const TAX_RATE: f64 = 0.21;

fn water() -> Product {
    Product::simple(27, "Sparkling Water", 1.20, Category::ColdDrinks)
}

fn apples() -> Product {
    Product::simple(5, "Granny Smith Apples", 2.99, Category::Salads)
}

fn margherita() -> Product {
    Product::configurable(
        1,
        "Margherita",
        12.90,
        Category::Pizza,
        default_pizza_sizes(),
        default_extra_ingredients(),
    )
}

fn selected_ingredients(item: &LineItem) -> &[SelectedIngredient] {
    match &item.config {
        ItemConfig::Configurable {
            selected_ingredients,
            ..
        } => selected_ingredients,
        ItemConfig::Simple => panic!("expected configurable row"),
    }
}

#[test]
fn test_add_product_appends_row() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
    assert_eq!(to_f64(unit_price(&cart.items()[0])), 2.99);
}

#[test]
fn test_repeated_add_merges_into_plain_row() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());
    cart.add_product(&apples());

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.summary().subtotal, 5.98);
}

#[test]
fn test_add_does_not_merge_into_customized_row() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());
    cart.change_size(0, "40cm");

    // The 40cm row is no longer the plain variant, so a new row appears
    cart.add_product(&margherita());
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.items()[1].quantity, 1);

    // But the fresh plain row merges on the next add
    cart.add_product(&margherita());
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.items()[1].quantity, 2);
}

#[test]
fn test_remove_line_item() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());
    cart.add_product(&water());

    cart.remove_line_item(0);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product_id, water().id);
}

#[test]
fn test_out_of_range_index_is_a_no_op() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());

    cart.remove_line_item(5);
    cart.change_quantity(5, 1);
    cart.set_quantity(5, 3);
    cart.change_size(5, "40cm");
    cart.add_ingredient(5, 1);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
}

#[test]
fn test_change_quantity_stepper() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());

    cart.change_quantity(0, 1);
    cart.change_quantity(0, 1);
    assert_eq!(cart.items()[0].quantity, 3);

    cart.change_quantity(0, -1);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn test_decreasing_from_one_removes_the_row() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());

    cart.change_quantity(0, -1);
    assert!(cart.is_empty());
}

#[test]
fn test_quantity_never_observably_below_one() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());
    cart.set_quantity(0, 4);

    for _ in 0..4 {
        if let Some(item) = cart.items().first() {
            assert!(item.quantity >= 1);
        }
        cart.change_quantity(0, -1);
    }
    assert!(cart.is_empty());
}

#[test]
fn test_set_quantity_clamps_to_one() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());

    cart.set_quantity(0, 0);
    assert_eq!(cart.items()[0].quantity, 1);

    cart.set_quantity(0, -3);
    assert_eq!(cart.items()[0].quantity, 1);

    cart.set_quantity(0, 12);
    assert_eq!(cart.items()[0].quantity, 12);
}

#[test]
fn test_change_size_reprices_the_row() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());
    assert_eq!(to_f64(unit_price(&cart.items()[0])), 12.90);

    cart.change_size(0, "40cm");
    assert_eq!(to_f64(unit_price(&cart.items()[0])), 19.35);
}

#[test]
fn test_change_size_ignores_unknown_id_and_plain_rows() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());
    cart.add_product(&water());

    cart.change_size(0, "50cm");
    assert_eq!(to_f64(unit_price(&cart.items()[0])), 12.90);

    cart.change_size(1, "40cm");
    assert_eq!(cart.items()[1].config, ItemConfig::Simple);
}

#[test]
fn test_add_ingredient() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());

    cart.add_ingredient(0, 1); // Extra Mozzarella, 2.50
    let extras = selected_ingredients(&cart.items()[0]);
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].quantity, 1);
    assert_eq!(to_f64(unit_price(&cart.items()[0])), 15.40);
}

#[test]
fn test_repeated_add_increments_ingredient_quantity() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());

    cart.add_ingredient(0, 2); // Pepperoni, 3.00
    cart.add_ingredient(0, 2);
    let extras = selected_ingredients(&cart.items()[0]);
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].quantity, 2);
    assert_eq!(to_f64(unit_price(&cart.items()[0])), 18.90);
}

#[test]
fn test_unknown_ingredient_is_a_no_op() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());

    cart.add_ingredient(0, 999);
    assert!(selected_ingredients(&cart.items()[0]).is_empty());

    cart.add_ingredient(1, 1); // simple row / missing row
    cart.add_product(&water());
    cart.add_ingredient(1, 1);
    assert_eq!(cart.items()[1].config, ItemConfig::Simple);
}

#[test]
fn test_ingredient_quantity_floor() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());
    cart.add_ingredient(0, 3); // Mushrooms
    cart.change_ingredient_quantity(0, 3, 1);
    assert_eq!(selected_ingredients(&cart.items()[0])[0].quantity, 2);

    cart.change_ingredient_quantity(0, 3, -1);
    assert_eq!(selected_ingredients(&cart.items()[0])[0].quantity, 1);

    // Crossing below 1 removes the entry; it is never stored at zero
    cart.change_ingredient_quantity(0, 3, -1);
    assert!(selected_ingredients(&cart.items()[0]).is_empty());
}

#[test]
fn test_remove_ingredient_drops_the_entry() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&margherita());
    cart.add_ingredient(0, 1);
    cart.add_ingredient(0, 1);
    cart.add_ingredient(0, 2);

    cart.remove_ingredient(0, 1);
    let extras = selected_ingredients(&cart.items()[0]);
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].id, 2);
}

#[test]
fn test_clear_empties_the_cart() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());
    cart.add_product(&margherita());

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.summary().subtotal, 0.0);
    assert_eq!(cart.summary().total, 0.0);
}

#[test]
fn test_item_count_sums_quantities() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());
    cart.add_product(&apples());
    cart.add_product(&water());
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn test_summary_totals_match_items() {
    let mut cart = CartStore::new(TAX_RATE);
    cart.add_product(&apples());
    cart.add_product(&apples());

    let summary = cart.summary();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.subtotal, 5.98);
    assert_eq!(summary.tax, 1.26); // 5.98 * 0.21 = 1.2558
    assert_eq!(summary.total, 7.24);
}

#[test]
fn test_observers_see_consistent_state_after_each_mutation() {
    let seen: Arc<Mutex<Vec<(usize, f64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut cart = CartStore::new(TAX_RATE);
    cart.subscribe(move |summary| {
        // Totals handed to observers always match the rows they accompany
        let expected = crate::pricing::order_totals(&summary.items, TAX_RATE);
        assert_eq!(summary.subtotal, expected.subtotal);
        assert_eq!(summary.total, expected.total);
        sink.lock()
            .unwrap()
            .push((summary.items.len(), summary.subtotal));
    });

    cart.add_product(&apples());
    cart.add_product(&apples());
    cart.change_quantity(0, -1);
    cart.clear();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], (1, 2.99));
    assert_eq!(seen[1], (1, 5.98));
    assert_eq!(seen[2], (1, 2.99));
    assert_eq!(seen[3], (0, 0.0));
}

#[test]
fn test_no_op_mutations_do_not_notify() {
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);

    let mut cart = CartStore::new(TAX_RATE);
    cart.subscribe(move |_| *sink.lock().unwrap() += 1);

    cart.remove_line_item(3);
    cart.change_quantity(3, 1);
    cart.change_size(0, "40cm");
    assert_eq!(*count.lock().unwrap(), 0);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);

    let mut cart = CartStore::new(TAX_RATE);
    let id = cart.subscribe(move |_| *sink.lock().unwrap() += 1);

    cart.add_product(&apples());
    cart.unsubscribe(id);
    cart.add_product(&apples());

    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_cart_persists_across_store_instances() {
    let storage = Storage::open_in_memory().unwrap();

    let mut cart = CartStore::with_storage(TAX_RATE, storage.clone());
    cart.add_product(&margherita());
    cart.change_size(0, "40cm");
    cart.add_ingredient(0, 1);
    let expected = cart.items().to_vec();

    let restored = CartStore::with_storage(TAX_RATE, storage);
    assert_eq!(restored.items(), expected.as_slice());
}
