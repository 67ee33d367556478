//! Nullable infrastructure for deterministic testing.
//!
//! Everything the client core talks to (transport, graph store, nonce
//! source) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Record what the core asked of them
//! - Never touch the network
//!
//! Each nullable is a cheap cloneable handle over shared state, so a test can
//! move one clone into the client and keep another for assertions.

pub mod random;
pub mod transport;
pub mod vault;

pub use random::NullRandom;
pub use transport::NullTransport;
pub use vault::{NullVault, VaultOp};
