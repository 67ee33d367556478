//! Abstract local vault graph store.
//!
//! The client core never keeps the mirrored graph itself. It decides when
//! nodes and references arrive or disappear and forwards each change to an
//! implementation of [`VaultGraph`]. Persistence, indexing, and querying are
//! the implementation's business.

pub mod graph;

pub use graph::VaultGraph;
