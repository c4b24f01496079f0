//! Decimal-safe price derivation
//!
//! All monetary arithmetic runs on `Decimal`; `f64` appears only at the
//! storage/display boundary via [`to_f64`], rounded half-up to 2 decimal
//! places. Rounding is applied at every externally observed value (unit
//! price, line total, subtotal, tax, total); intermediate sums keep full
//! precision.
//!
//! These functions are pure: callers re-run them whenever the cart
//! mutates, so derived totals can never drift from the item list.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::order::{ItemConfig, LineItem};

/// Rounding target for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Non-finite input carries no meaningful monetary value; it logs an
/// error and maps to zero rather than poisoning downstream totals.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: a Decimal rounded to 2dp is always within f64 range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-unit price of a line item, independent of row quantity
///
/// Plain rows price at the base price. Configurable rows price at
/// `base_price * size.multiplier + Σ ingredient.price * quantity`.
pub fn unit_price(item: &LineItem) -> Decimal {
    let base = to_decimal(item.base_price);
    let price = match &item.config {
        ItemConfig::Simple => base,
        ItemConfig::Configurable {
            selected_size,
            selected_ingredients,
            ..
        } => {
            let extras: Decimal = selected_ingredients
                .iter()
                .map(|ing| to_decimal(ing.price) * Decimal::from(ing.quantity))
                .sum();
            base * to_decimal(selected_size.multiplier) + extras
        }
    };

    round_money(price.max(Decimal::ZERO))
}

/// Line total: unit price times row quantity
pub fn line_total(item: &LineItem) -> Decimal {
    round_money(unit_price(item) * Decimal::from(item.quantity))
}

/// Order subtotal: sum of line totals
///
/// A plain commutative sum, so the result is invariant under reordering
/// of the item list.
pub fn order_subtotal(items: &[LineItem]) -> Decimal {
    items.iter().map(line_total).sum()
}

/// Tax on a subtotal at the given rate
///
/// The rate is a parameter rather than a hidden constant so deployments
/// can vary it without a code change.
pub fn order_tax(subtotal: Decimal, tax_rate: f64) -> Decimal {
    round_money(subtotal * to_decimal(tax_rate))
}

/// Grand total: subtotal plus tax
pub fn order_total(subtotal: Decimal, tax: Decimal) -> Decimal {
    subtotal + tax
}

/// Rounded totals triple for order records and cart summaries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute subtotal, tax and total in one pass
pub fn order_totals(items: &[LineItem], tax_rate: f64) -> OrderTotals {
    let subtotal = order_subtotal(items);
    let tax = order_tax(subtotal, tax_rate);
    let total = order_total(subtotal, tax);
    OrderTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        total: to_f64(total),
    }
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}
