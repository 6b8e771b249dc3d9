// 7.0 config.rs: all strategy settings in one place. limits, fair values, skew tuning.
// 7.1 QuotingParams holds the inventory skew knobs. no per-tick overrides yet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::position::PositionLedger;
use crate::types::{FairValue, Symbol, Volume};

pub const RAINFOREST_RESIN: &str = "RAINFOREST_RESIN";

/// Default size budget for one diagnostic record, in characters.
pub const DEFAULT_LOG_BUDGET: usize = 3750;

/** 7.1: inventory skew tuning. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotingParams {
    // Largest single passive order
    pub passive_cap: Volume,
    // Inventory beyond which same-side quoting backs off
    pub soft_inventory_threshold: Volume,
}

impl Default for QuotingParams {
    fn default() -> Self {
        Self {
            passive_cap: 40,
            soft_inventory_threshold: 15,
        }
    }
}

// Everything the engine needs to quote one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    // Hard symmetric limit on signed inventory
    pub position_limit: Volume,
    pub fair_value: FairValue,
    #[serde(default)]
    pub quoting: QuotingParams,
}

impl ProductConfig {
    pub fn new(position_limit: Volume, fair_value: FairValue) -> Self {
        Self {
            position_limit,
            fair_value,
            quoting: QuotingParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderConfig {
    pub products: BTreeMap<Symbol, ProductConfig>,
    // Character budget for one diagnostic record
    #[serde(default = "default_log_budget")]
    pub log_budget: usize,
}

fn default_log_budget() -> usize {
    DEFAULT_LOG_BUDGET
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self::rainforest_resin()
    }
}

impl TraderConfig {
    // Resin is anchored at 10,000 with a ±50 limit
    pub fn rainforest_resin() -> Self {
        let mut products = BTreeMap::new();
        products.insert(
            RAINFOREST_RESIN.to_string(),
            ProductConfig::new(50, FairValue::constant(10_000)),
        );
        Self {
            products,
            log_budget: DEFAULT_LOG_BUDGET,
        }
    }

    pub fn with_product(mut self, symbol: impl Into<Symbol>, product: ProductConfig) -> Self {
        self.products.insert(symbol.into(), product);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn product(&self, symbol: &str) -> Option<&ProductConfig> {
        self.products.get(symbol)
    }

    /// A fresh ledger carrying every configured limit.
    pub fn ledger(&self) -> PositionLedger {
        self.products
            .iter()
            .fold(PositionLedger::default(), |ledger, (symbol, product)| {
                ledger.with_limit(symbol.clone(), product.position_limit)
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.products.is_empty() {
            return Err(ConfigError::NoProducts);
        }

        for (symbol, product) in &self.products {
            if product.position_limit <= 0 {
                return Err(ConfigError::InvalidProduct {
                    symbol: symbol.clone(),
                    reason: "position limit must be positive".to_string(),
                });
            }
            if product.fair_value.is_crossed() {
                return Err(ConfigError::InvalidProduct {
                    symbol: symbol.clone(),
                    reason: "acceptable bid above acceptable ask".to_string(),
                });
            }
            if product.quoting.passive_cap <= 0 {
                return Err(ConfigError::InvalidProduct {
                    symbol: symbol.clone(),
                    reason: "passive cap must be positive".to_string(),
                });
            }
            if product.quoting.soft_inventory_threshold < 0 {
                return Err(ConfigError::InvalidProduct {
                    symbol: symbol.clone(),
                    reason: "soft inventory threshold must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("No products configured")]
    NoProducts,

    #[error("Invalid product {symbol}: {reason}")]
    InvalidProduct { symbol: Symbol, reason: String },

    #[error("Config parse error: {0}")]
    Parse(String),
}
