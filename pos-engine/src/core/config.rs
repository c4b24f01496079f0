/// Engine configuration
///
/// # Environment variables
///
/// Every setting can be overridden through an environment variable:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | POS_DATA_DIR | ./data | Directory holding the embedded store |
/// | POS_TAX_RATE | 0.21 | VAT rate applied to order subtotals |
/// | POS_CURRENCY | € | Currency symbol for display |
/// | POS_LOG_LEVEL | info | Log level for the tracing subscriber |
///
/// Tax rate and currency only seed the persisted settings blob on first
/// run; after that the blob is authoritative.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory for the redb database file
    pub data_dir: String,
    /// VAT rate used when no settings blob exists yet
    pub tax_rate: f64,
    /// Currency symbol used when no settings blob exists yet
    pub currency: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("POS_DATA_DIR").unwrap_or_else(|_| "./data".into()),
            tax_rate: std::env::var("POS_TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.21),
            currency: std::env::var("POS_CURRENCY").unwrap_or_else(|_| "€".into()),
            log_level: std::env::var("POS_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
