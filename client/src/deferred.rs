//! Deferred links — follow-up work tied to a pending node creation.
//!
//! Creating a node and hanging it under a parent takes two round trips: the
//! server must assign the new node's id before the reference can be added.
//! The parent is parked here under the create request's transaction id and
//! consumed exactly once when that reply arrives (or when it fails or
//! expires).

use std::collections::HashMap;

use vaultlink_types::{NodeId, TransId};

#[derive(Debug, Default)]
pub struct DeferredLinks {
    links: HashMap<TransId, NodeId>,
}

impl DeferredLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, trans_id: TransId, parent: NodeId) {
        self.links.insert(trans_id, parent);
    }

    /// Consume the link for `trans_id`, returning the parent it targets.
    pub fn take(&mut self, trans_id: TransId) -> Option<NodeId> {
        self.links.remove(&trans_id)
    }

    pub fn contains(&self, trans_id: TransId) -> bool {
        self.links.contains_key(&trans_id)
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_once() {
        let mut links = DeferredLinks::new();
        links.insert(TransId(7), NodeId(100));
        assert!(links.contains(TransId(7)));
        assert_eq!(links.take(TransId(7)), Some(NodeId(100)));
        assert_eq!(links.take(TransId(7)), None);
        assert!(links.is_empty());
    }

    #[test]
    fn links_are_independent() {
        let mut links = DeferredLinks::new();
        links.insert(TransId(1), NodeId(10));
        links.insert(TransId(2), NodeId(10));
        assert_eq!(links.take(TransId(2)), Some(NodeId(10)));
        assert_eq!(links.len(), 1);
        assert!(links.contains(TransId(1)));
    }
}
