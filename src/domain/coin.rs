use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Denominations the coin slot accepts, in ascending order.
pub const ACCEPTED_COINS: [u32; 4] = [1, 2, 5, 10];

/// A coin the slot accepts.
///
/// Construction validates the face value, so holding a `Coin` proves the
/// denomination is one of [`ACCEPTED_COINS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Coin(u32);

impl Coin {
    pub fn new(denomination: u32) -> Result<Self, VendingError> {
        if ACCEPTED_COINS.contains(&denomination) {
            Ok(Self(denomination))
        } else {
            Err(VendingError::InvalidCoin(denomination))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Coin {
    type Error = VendingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Coin> for u32 {
    fn from(coin: Coin) -> Self {
        coin.0
    }
}

/// Count of coins per denomination.
///
/// Used for the machine's stock, the user's balance and the change being
/// assembled. Every accepted denomination is always present, so lookups of
/// accepted coins never miss. Restocking may add further denominations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<u32, u32>", into = "BTreeMap<u32, u32>")]
pub struct CoinMap(BTreeMap<u32, u32>);

impl CoinMap {
    /// A map holding zero of every accepted denomination.
    pub fn zeroed() -> Self {
        Self(ACCEPTED_COINS.iter().map(|&coin| (coin, 0)).collect())
    }

    pub fn count(&self, denomination: u32) -> u32 {
        self.0.get(&denomination).copied().unwrap_or(0)
    }

    /// Adds `count` coins of `denomination`, failing if the count no longer
    /// fits in a `u32`. The map is unchanged on failure.
    pub fn add(&mut self, denomination: u32, count: u32) -> Result<(), VendingError> {
        let slot = self.0.entry(denomination).or_insert(0);
        *slot = slot
            .checked_add(count)
            .ok_or(VendingError::CoinOverflow(denomination))?;
        Ok(())
    }

    pub fn set(&mut self, denomination: u32, count: u32) {
        self.0.insert(denomination, count);
    }

    /// Monetary value held: the sum of denomination × count.
    pub fn total(&self) -> u64 {
        self.0
            .iter()
            .map(|(&coin, &count)| u64::from(coin) * u64::from(count))
            .fold(0, u64::saturating_add)
    }

    /// Number of physical coins held, regardless of denomination.
    pub fn coin_count(&self) -> u64 {
        self.0.values().map(|&count| u64::from(count)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(&coin, &count)| (coin, count))
    }
}

impl Default for CoinMap {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Starts from [`CoinMap::zeroed`]; counts of a repeated denomination
/// saturate at `u32::MAX`.
impl FromIterator<(u32, u32)> for CoinMap {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut map = Self::zeroed();
        for (coin, count) in iter {
            let slot = map.0.entry(coin).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        map
    }
}

impl From<BTreeMap<u32, u32>> for CoinMap {
    fn from(counts: BTreeMap<u32, u32>) -> Self {
        counts.into_iter().collect()
    }
}

impl From<CoinMap> for BTreeMap<u32, u32> {
    fn from(map: CoinMap) -> Self {
        map.0
    }
}

impl fmt::Display for CoinMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (coin, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{coin}={count}")?;
        }
        write!(f, "}}")
    }
}
