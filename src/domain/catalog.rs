use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Products on offer, keyed by unique name, with their price.
///
/// Each entry is a single-unit slot: selling the product removes the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<String, u32>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the product, overwriting the price of an existing entry.
    pub fn insert(&mut self, name: impl Into<String>, price: u32) {
        self.0.insert(name.into(), price);
    }

    pub fn price(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<u32> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(name, &price)| (name.as_str(), price))
    }
}

impl FromIterator<(String, u32)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, price)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={price}")?;
        }
        write!(f, "}}")
    }
}
