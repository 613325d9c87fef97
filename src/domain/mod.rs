//! Domain layer: coins, the catalog, change making and the machine itself.

pub mod catalog;
pub mod change;
pub mod coin;
pub mod machine;
pub mod session;
