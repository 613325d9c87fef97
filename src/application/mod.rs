//! Application layer that shares a machine between terminals.
//!
//! This module defines the `VendingTerminal`, which serializes every operation
//! on one machine behind a single `tokio` mutex and replays recorded sessions.

pub mod terminal;
