//! Nullable vault store — records every graph call in order.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use vaultlink_store::VaultGraph;
use vaultlink_types::{NodeId, NodeRef, VaultNode};

/// One call the core made on the graph store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultOp {
    UpsertNode(NodeId),
    AddRef(NodeRef),
    RemoveRef(NodeId, NodeId),
    QueueRoot(NodeId),
}

#[derive(Default)]
struct State {
    ops: Vec<VaultOp>,
    nodes: HashMap<NodeId, VaultNode>,
    refs: HashSet<(NodeId, NodeId)>,
    roots: Vec<NodeId>,
}

/// An in-memory graph store for tests.
#[derive(Clone, Default)]
pub struct NullVault {
    state: Arc<Mutex<State>>,
}

impl NullVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<VaultOp> {
        self.state.lock().unwrap().ops.clone()
    }

    pub fn node(&self, id: NodeId) -> Option<VaultNode> {
        self.state.lock().unwrap().nodes.get(&id).cloned()
    }

    pub fn has_ref(&self, parent: NodeId, child: NodeId) -> bool {
        self.state.lock().unwrap().refs.contains(&(parent, child))
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.state.lock().unwrap().roots.clone()
    }

    /// Number of `AddRef` calls seen for exactly this edge.
    pub fn add_ref_count(&self, node_ref: NodeRef) -> usize {
        self.state
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter(|op| **op == VaultOp::AddRef(node_ref))
            .count()
    }
}

impl VaultGraph for NullVault {
    fn upsert_node(&mut self, node: VaultNode) {
        let mut state = self.state.lock().unwrap();
        state.ops.push(VaultOp::UpsertNode(node.node_id));
        state.nodes.insert(node.node_id, node);
    }

    fn add_ref(&mut self, node_ref: NodeRef) {
        let mut state = self.state.lock().unwrap();
        state.ops.push(VaultOp::AddRef(node_ref));
        state.refs.insert((node_ref.parent, node_ref.child));
    }

    fn remove_ref(&mut self, parent: NodeId, child: NodeId) {
        let mut state = self.state.lock().unwrap();
        state.ops.push(VaultOp::RemoveRef(parent, child));
        state.refs.remove(&(parent, child));
    }

    fn queue_root(&mut self, root: NodeId) {
        let mut state = self.state.lock().unwrap();
        state.ops.push(VaultOp::QueueRoot(root));
        state.roots.push(root);
    }
}
