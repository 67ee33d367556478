//! Fundamental types for the vaultlink client.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: node and transaction identifiers, vault references, player and
//! file descriptors, age descriptors, and protocol result codes.

pub mod age;
pub mod error;
pub mod file;
pub mod guid;
pub mod ids;
pub mod player;
pub mod result;
pub mod vault;

pub use age::{AgeInfo, AgeLink};
pub use error::TypesError;
pub use file::FileItem;
pub use guid::Guid;
pub use ids::{NodeId, TransId};
pub use player::PlayerInfo;
pub use result::NetResult;
pub use vault::{NodeRef, VaultNode};
