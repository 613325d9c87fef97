//! Operator startup configuration.
//!
//! The machine seeds its catalog and coin stock from a [`MachineConfig`] on
//! construction and returns to it on every reset.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Catalog and coin stock the machine starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Product name to price.
    #[serde(default)]
    pub products: BTreeMap<String, u32>,
    /// Denomination to number of coins available for change.
    #[serde(default)]
    pub coin_stock: BTreeMap<u32, u32>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::empty()
            .with_product("water", 7)
            .with_product("coca", 8)
            .with_product("bueno", 20)
            .with_product("twix", 5)
            .with_coins(1, 5)
            .with_coins(2, 2)
    }
}

impl MachineConfig {
    /// A configuration with no products and no coins.
    pub fn empty() -> Self {
        Self {
            products: BTreeMap::new(),
            coin_stock: BTreeMap::new(),
        }
    }

    pub fn with_product(mut self, name: impl Into<String>, price: u32) -> Self {
        self.products.insert(name.into(), price);
        self
    }

    /// Sets the stock of `denomination`, replacing any earlier count.
    pub fn with_coins(mut self, denomination: u32, count: u32) -> Self {
        self.coin_stock.insert(denomination, count);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }
}
