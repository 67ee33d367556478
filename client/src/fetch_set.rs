//! Fetch deduplication set.
//!
//! Remembers every vault node id the client has already requested (or been
//! told about) during the current session, so traversal fetches each node
//! once. Membership means "already seen", not "currently pending": entries
//! are only dropped by an explicit [`FetchSet::invalidate`].

use std::collections::HashSet;

use vaultlink_types::NodeId;

#[derive(Debug, Default)]
pub struct FetchSet {
    seen: HashSet<NodeId>,
}

impl FetchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-then-insert in one step.
    ///
    /// Returns `true` if `id` was not yet known and has now been recorded,
    /// i.e. the caller should issue the fetch.
    pub fn insert_if_absent(&mut self, id: NodeId) -> bool {
        self.seen.insert(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.seen.contains(&id)
    }

    /// Forget everything; the next traversal refetches from scratch.
    pub fn invalidate(&mut self) {
        self.seen.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.seen.iter()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
