//! # Dashboard Configuration
//!
//! Environment-based configuration for the analytics layer.

use std::env;
use std::path::PathBuf;

use crate::classification::MIN_THRESHOLD_STEP;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Directory holding the eleven CSV files
    pub data_dir: PathBuf,

    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Initial classification threshold
    pub default_threshold: f64,

    /// Threshold slider granularity
    pub threshold_step: f64,

    /// Rows in the top-products table
    pub top_products: usize,

    /// Default age histogram bin width
    pub age_bin_width: u32,
}

impl DashboardConfig {
    pub const MIN_AGE_BIN_WIDTH: u32 = 2;
    pub const MAX_AGE_BIN_WIDTH: u32 = 10;

    /// Load configuration from environment variables, reading `.env` first
    /// when one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            data_dir: env::var("NOVAMART_DATA_DIR")
                .map_or_else(|_| PathBuf::from("data"), PathBuf::from),

            log_level: env::var("NOVAMART_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            default_threshold: env::var("NOVAMART_DEFAULT_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|t| (0.0..=1.0).contains(t))
                .unwrap_or(0.5),

            threshold_step: env::var("NOVAMART_THRESHOLD_STEP")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|s| (MIN_THRESHOLD_STEP..=1.0).contains(s))
                .unwrap_or(0.05),

            top_products: env::var("NOVAMART_TOP_PRODUCTS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(10),

            age_bin_width: env::var("NOVAMART_AGE_BIN_WIDTH")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|w| (Self::MIN_AGE_BIN_WIDTH..=Self::MAX_AGE_BIN_WIDTH).contains(w))
                .unwrap_or(5),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_within_bounds() {
        let config = DashboardConfig::from_env();
        assert!((0.0..=1.0).contains(&config.default_threshold));
        assert!(config.threshold_step > 0.0);
        assert!(
            (DashboardConfig::MIN_AGE_BIN_WIDTH..=DashboardConfig::MAX_AGE_BIN_WIDTH)
                .contains(&config.age_bin_width)
        );
    }
}
