//! Store settings

use serde::{Deserialize, Serialize};

/// Deployment settings persisted alongside the cart and order blobs
///
/// The tax rate is configuration, not a constant baked into the pricing
/// code, so it can vary per deployment without a code change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// VAT rate applied to order subtotals (0.21 = 21%)
    pub tax_rate: f64,
    /// Currency symbol used at the presentation boundary
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tax_rate: 0.21,
            currency: "€".to_string(),
        }
    }
}
