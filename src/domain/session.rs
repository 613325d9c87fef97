use super::coin::CoinMap;
use crate::error::VendingError;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Restock,
    AddProduct,
    Insert,
    Select,
    Cancel,
    Submit,
    Reset,
}

/// One recorded operation against a machine.
///
/// `amount` is the coin count for `restock` and the price for `add_product`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct SessionEvent {
    pub action: Action,
    pub denomination: Option<u32>,
    pub product: Option<String>,
    pub amount: Option<u32>,
}

impl SessionEvent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            denomination: None,
            product: None,
            amount: None,
        }
    }

    pub fn restock(denomination: u32, count: u32) -> Self {
        Self {
            denomination: Some(denomination),
            amount: Some(count),
            ..Self::new(Action::Restock)
        }
    }

    pub fn add_product(name: impl Into<String>, price: u32) -> Self {
        Self {
            product: Some(name.into()),
            amount: Some(price),
            ..Self::new(Action::AddProduct)
        }
    }

    pub fn insert(denomination: u32) -> Self {
        Self {
            denomination: Some(denomination),
            ..Self::new(Action::Insert)
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self {
            product: Some(name.into()),
            ..Self::new(Action::Select)
        }
    }

    pub fn require_denomination(&self) -> Result<u32, VendingError> {
        self.denomination.ok_or_else(|| self.missing("denomination"))
    }

    pub fn require_product(&self) -> Result<&str, VendingError> {
        self.product
            .as_deref()
            .ok_or_else(|| self.missing("product"))
    }

    pub fn require_amount(&self) -> Result<u32, VendingError> {
        self.amount.ok_or_else(|| self.missing("amount"))
    }

    fn missing(&self, field: &str) -> VendingError {
        VendingError::MalformedEvent(format!("{:?} requires a {field}", self.action))
    }
}

/// What applying a [`SessionEvent`] produced.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Restocked,
    ProductAdded,
    Acknowledged(String),
    /// Coins handed back by a cancel.
    Returned(CoinMap),
    /// Confirmation of a completed purchase.
    Purchased(String),
    Reset,
}
