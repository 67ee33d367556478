//! Graph store trait.

use vaultlink_types::{NodeId, NodeRef, VaultNode};

/// Receives authoritative vault data from the client core.
///
/// Calls are made inline from reply handlers and must not block.
pub trait VaultGraph: Send {
    /// Insert or replace a node's contents.
    fn upsert_node(&mut self, node: VaultNode);

    /// Record a `parent -> child` edge.
    fn add_ref(&mut self, node_ref: NodeRef);

    /// Drop a `parent -> child` edge.
    fn remove_ref(&mut self, parent: NodeId, child: NodeId);

    /// Start tracking `root` as the top of a tree to display.
    fn queue_root(&mut self, root: NodeId);
}

impl<G: VaultGraph + ?Sized> VaultGraph for Box<G> {
    fn upsert_node(&mut self, node: VaultNode) {
        (**self).upsert_node(node)
    }

    fn add_ref(&mut self, node_ref: NodeRef) {
        (**self).add_ref(node_ref)
    }

    fn remove_ref(&mut self, parent: NodeId, child: NodeId) {
        (**self).remove_ref(parent, child)
    }

    fn queue_root(&mut self, root: NodeId) {
        (**self).queue_root(root)
    }
}
