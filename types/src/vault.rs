//! Vault graph records: nodes and the references between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::NodeId;

/// One edge of the vault graph: `parent -> child`, tagged with the owner
/// that created it (0 when unowned).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub parent: NodeId,
    pub child: NodeId,
    pub owner: u32,
}

impl NodeRef {
    pub fn new(parent: NodeId, child: NodeId, owner: u32) -> Self {
        Self {
            parent,
            child,
            owner,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} -> {}}} {}", self.parent, self.child, self.owner)
    }
}

/// A vault node as delivered by the server.
///
/// The field payload is kept opaque: this client never interprets it, it
/// only forwards it to the graph store or back to the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultNode {
    pub node_id: NodeId,
    pub node_type: u32,
    pub owner: u32,
    pub modify_time: u32,
    pub data: Vec<u8>,
}

impl VaultNode {
    /// A template with only a type set, as used for creation and search.
    pub fn template(node_type: u32) -> Self {
        Self {
            node_type,
            ..Default::default()
        }
    }
}
