//! Adapters that feed recorded sessions into the machine.

pub mod csv;
