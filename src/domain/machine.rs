use super::catalog::Catalog;
use super::change;
use super::coin::{ACCEPTED_COINS, Coin, CoinMap};
use crate::config::MachineConfig;
use crate::error::{Result, VendingError};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Acknowledgment returned by coin insertion and product selection.
pub const ACKNOWLEDGEMENT: &str = "Done";

/// Where the pending transaction stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MachineState {
    Idle,
    CoinsInserted,
    ProductSelected,
    /// The only state a purchase can complete from.
    CoinsInsertedAndProductSelected,
}

impl MachineState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CoinsInserted => "CoinsInserted",
            Self::ProductSelected => "ProductSelected",
            Self::CoinsInsertedAndProductSelected => "CoinsInsertedAndProductSelected",
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializable view of everything the machine holds, in dump order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineSnapshot {
    pub accepted_coins: Vec<u32>,
    pub coin_stock: CoinMap,
    pub catalog: Catalog,
    pub user_balance: CoinMap,
    /// Empty when nothing is selected.
    pub selected_product: String,
    pub change_combination: CoinMap,
}

/// A coin-operated vending machine.
///
/// Owns the catalog, the coin stock used for change and the pending user
/// transaction. Every operation runs to completion against `&mut self`; wrap
/// the machine in [`crate::application::terminal::VendingTerminal`] to share it.
#[derive(Debug, Clone)]
pub struct VendingMachine {
    config: MachineConfig,
    coin_stock: CoinMap,
    catalog: Catalog,
    user_balance: CoinMap,
    selected_product: Option<String>,
    change_combination: CoinMap,
}

impl Default for VendingMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl VendingMachine {
    /// Creates a machine seeded from [`MachineConfig::default`].
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Creates a machine seeded from `config`. [`reset`](Self::reset)
    /// returns to the same configuration.
    pub fn with_config(config: MachineConfig) -> Self {
        let mut machine = Self {
            config,
            coin_stock: CoinMap::zeroed(),
            catalog: Catalog::new(),
            user_balance: CoinMap::zeroed(),
            selected_product: None,
            change_combination: CoinMap::zeroed(),
        };
        machine.seed();
        machine
    }

    fn seed(&mut self) {
        self.coin_stock = self
            .config
            .coin_stock
            .iter()
            .map(|(&coin, &count)| (coin, count))
            .collect();
        self.catalog = self
            .config
            .products
            .iter()
            .map(|(name, &price)| (name.clone(), price))
            .collect();
        self.user_balance = CoinMap::zeroed();
        self.selected_product = None;
        self.change_combination = CoinMap::zeroed();
    }

    /// Adds `count` coins of `denomination` to the stock used for change.
    ///
    /// Fails only when the stocked count would no longer fit in a `u32`, in
    /// which case the stock is unchanged.
    pub fn restock(&mut self, denomination: u32, count: u32) -> Result<()> {
        self.coin_stock
            .add(denomination, count)
            .inspect_err(|_| warn!(denomination, count, "coin stock overflow"))?;
        info!(denomination, count, "restocked coins");
        Ok(())
    }

    /// Adds a product, overwriting the price of an existing entry.
    pub fn add_product(&mut self, name: impl Into<String>, price: u32) {
        let name = name.into();
        info!(product = %name, price, "product added");
        self.catalog.insert(name, price);
    }

    /// Puts a coin in the slot. The coin counts towards the user's balance
    /// but only reaches the stock once a purchase completes.
    pub fn insert_coin(&mut self, denomination: u32) -> Result<&'static str> {
        let coin = Coin::new(denomination).inspect_err(|_| {
            warn!(denomination, "rejected coin");
        })?;
        self.user_balance.add(coin.value(), 1)?;
        debug!(
            denomination,
            balance = self.user_balance.total(),
            "coin inserted"
        );
        Ok(ACKNOWLEDGEMENT)
    }

    /// Selects `name` for purchase, replacing any earlier selection.
    pub fn select_product(&mut self, name: &str) -> Result<&'static str> {
        if !self.catalog.contains(name) {
            warn!(product = name, "product unavailable");
            return Err(VendingError::ProductUnavailable(name.to_string()));
        }
        self.selected_product = Some(name.to_string());
        debug!(product = name, "product selected");
        Ok(ACKNOWLEDGEMENT)
    }

    /// Aborts the pending transaction and hands back the inserted coins.
    pub fn cancel(&mut self) -> CoinMap {
        let returned = std::mem::take(&mut self.user_balance);
        self.selected_product = None;
        debug!(returned = returned.total(), "transaction cancelled");
        returned
    }

    /// Completes the purchase of the selected product.
    ///
    /// On success the inserted coins move into the stock, the change is paid
    /// out of it and the product leaves the catalog. On failure the stock,
    /// catalog, balance and selection are exactly as before the call.
    pub fn submit(&mut self) -> Result<String> {
        let Some(product) = self.selected_product.clone() else {
            let paid = self.user_balance.total();
            if paid == 0 {
                warn!("submit with nothing selected");
                return Err(VendingError::NothingSelected);
            }
            // Coins without a selection have nothing to pay for.
            warn!(paid, "submit with coins but no selection");
            return Err(VendingError::InsufficientChangeAvailable);
        };
        let price = self
            .catalog
            .price(&product)
            .ok_or_else(|| VendingError::ProductUnavailable(product.clone()))?;
        let paid = self.user_balance.total();

        // Underpayment surfaces as missing change, the same as an empty till.
        let Some(change) = paid.checked_sub(u64::from(price)) else {
            warn!(product = %product, price, paid, "not enough coins inserted");
            return Err(VendingError::InsufficientChangeAvailable);
        };

        if change > 0 && !self.compute_change(change) {
            self.change_combination = CoinMap::zeroed();
            warn!(product = %product, change, "no coins for change");
            return Err(VendingError::InsufficientChangeAvailable);
        }

        let settled = match self.settled_stock() {
            Ok(settled) => settled,
            Err(e) => {
                self.change_combination = CoinMap::zeroed();
                warn!(product = %product, error = %e, "cannot settle coin stock");
                return Err(e);
            }
        };

        self.finalize(&product, settled);
        info!(product = %product, price, change, "product sold");
        Ok(format!(
            "You bought a {product}\nThe remaining change: {change}"
        ))
    }

    /// Returns the machine to its startup configuration.
    pub fn reset(&mut self) {
        self.seed();
        info!("machine reset");
    }

    fn compute_change(&mut self, target: u64) -> bool {
        change::allocate(&self.coin_stock, target, &mut self.change_combination)
    }

    /// Stock after paying out the change combination and taking in the
    /// user's coins.
    fn settled_stock(&self) -> Result<CoinMap> {
        let mut stock = self.coin_stock.clone();
        for coin in ACCEPTED_COINS {
            // Allocation never claims more coins than the stock holds.
            let kept = stock.count(coin) - self.change_combination.count(coin);
            stock.set(coin, kept);
            stock.add(coin, self.user_balance.count(coin))?;
        }
        Ok(stock)
    }

    fn finalize(&mut self, product: &str, settled: CoinMap) {
        self.coin_stock = settled;
        self.catalog.remove(product);
        self.selected_product = None;
        self.user_balance = CoinMap::zeroed();
        self.change_combination = CoinMap::zeroed();
    }

    pub fn state(&self) -> MachineState {
        match (self.user_balance.coin_count() > 0, self.selected_product.is_some()) {
            (false, false) => MachineState::Idle,
            (true, false) => MachineState::CoinsInserted,
            (false, true) => MachineState::ProductSelected,
            (true, true) => MachineState::CoinsInsertedAndProductSelected,
        }
    }

    /// Value of the coins inserted for the pending transaction.
    pub fn balance_total(&self) -> u64 {
        self.user_balance.total()
    }

    pub fn coin_stock(&self) -> &CoinMap {
        &self.coin_stock
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn user_balance(&self) -> &CoinMap {
        &self.user_balance
    }

    pub fn selected_product(&self) -> Option<&str> {
        self.selected_product.as_deref()
    }

    pub fn change_combination(&self) -> &CoinMap {
        &self.change_combination
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            accepted_coins: ACCEPTED_COINS.to_vec(),
            coin_stock: self.coin_stock.clone(),
            catalog: self.catalog.clone(),
            user_balance: self.user_balance.clone(),
            selected_product: self.selected_product.clone().unwrap_or_default(),
            change_combination: self.change_combination.clone(),
        }
    }
}

impl fmt::Display for VendingMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VendingMachine{{ACCEPTED_COINS={:?}, coinsStock={}, products={}, userBalance={}, selectedProduct='{}', changeCombination={}}}",
            ACCEPTED_COINS,
            self.coin_stock,
            self.catalog,
            self.user_balance,
            self.selected_product.as_deref().unwrap_or_default(),
            self.change_combination,
        )
    }
}
