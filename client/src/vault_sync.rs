//! Vault graph synchronization.
//!
//! Fetch replies and server pushes are forwarded to the [`VaultGraph`];
//! every node id they mention is fetched at most once per session, gated by
//! the [`FetchSet`](crate::FetchSet). The server is authoritative for vault
//! data, so fetch replies are applied even when their transaction is no
//! longer known (the fault is still reported).

use tracing::{debug, info, trace, warn};
use vaultlink_protocol::{AuthRequest, AuthTransport, RequestKind};
use vaultlink_store::VaultGraph;
use vaultlink_types::{Guid, NetResult, NodeId, NodeRef, TransId, VaultNode};

use crate::{AuthClient, ClientError, ClientEvent, LoginState};

impl<T: AuthTransport, G: VaultGraph> AuthClient<T, G> {
    /// Fetch a node regardless of whether it was fetched before.
    pub fn request_node_fetch(&mut self, node_id: NodeId) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::VaultNodeFetch { node_id })
    }

    pub fn fetch_node_refs(&mut self, node_id: NodeId) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::VaultFetchNodeRefs { node_id })
    }

    /// Fetch `node_id` unless this session has already seen it. Returns
    /// whether it was new.
    fn fetch_if_unseen(&mut self, node_id: NodeId) -> bool {
        if self.fetch_set.insert_if_absent(node_id) {
            let _ = self.request_node_fetch(node_id);
            true
        } else {
            trace!(node = %node_id, "already fetched");
            if let Some(metrics) = &self.metrics {
                metrics.fetches_skipped.inc();
            }
            false
        }
    }

    pub(crate) fn on_node_refs_fetched(
        &mut self,
        trans_id: TransId,
        result: NetResult,
        refs: Vec<NodeRef>,
    ) {
        self.settle(trans_id, RequestKind::VaultFetchNodeRefs);
        if !result.is_success() {
            self.status(format!("Fetch Refs Failed ({result})"));
            return;
        }

        debug!(refs = refs.len(), "node refs fetched");
        for node_ref in refs {
            self.status(format!("Ref: {node_ref}"));
            self.vault.add_ref(node_ref);
            self.fetch_if_unseen(node_ref.child);
            self.fetch_if_unseen(node_ref.parent);
        }
    }

    pub(crate) fn on_node_fetched(&mut self, trans_id: TransId, result: NetResult, node: VaultNode) {
        self.settle(trans_id, RequestKind::VaultNodeFetch);
        if !result.is_success() {
            self.status(format!("Fetch Node Failed ({result})"));
            return;
        }

        let node_id = node.node_id;
        self.status(format!("Node: ({node_id})"));
        self.vault.upsert_node(node);

        if self.session.state == LoginState::VaultRootRequested
            && node_id == NodeId(self.session.player_id)
        {
            info!(node = %node_id, "vault root received");
            self.session.state = LoginState::Ready;
        }
    }

    /// A node's contents changed on the server: always refetch it.
    pub(crate) fn on_node_changed(&mut self, node_id: NodeId, revision: Guid) {
        debug!(node = %node_id, revision = %revision, "node changed");
        self.fetch_set.insert_if_absent(node_id);
        let _ = self.request_node_fetch(node_id);
    }

    /// A reference was added on the server. Nodes not seen before are
    /// fetched together with their own refs.
    pub(crate) fn on_ref_pushed(&mut self, parent: NodeId, child: NodeId, owner: u32) {
        let node_ref = NodeRef::new(parent, child, owner);
        self.status(format!("Ref: {node_ref}"));
        self.vault.add_ref(node_ref);

        for node_id in [parent, child] {
            if self.fetch_set.insert_if_absent(node_id) {
                let _ = self.request_node_fetch(node_id);
                let _ = self.fetch_node_refs(node_id);
            }
        }
    }

    pub(crate) fn on_unref_pushed(&mut self, parent: NodeId, child: NodeId) {
        self.status(format!("UnRef: {{{parent} -> {child}}}"));
        self.vault.remove_ref(parent, child);
    }

    /// Create `node` and, once the server has assigned its id, add it as a
    /// child of `parent`.
    pub fn create_node_and_link(
        &mut self,
        parent: NodeId,
        node: VaultNode,
    ) -> Result<TransId, ClientError> {
        let trans_id = self.issue(AuthRequest::VaultNodeCreate { node })?;
        self.deferred.insert(trans_id, parent);
        debug!(trans = %trans_id, parent = %parent, "node creation pending");
        Ok(trans_id)
    }

    pub(crate) fn on_node_created(&mut self, trans_id: TransId, result: NetResult, node_id: NodeId) {
        if self.settle(trans_id, RequestKind::VaultNodeCreate).is_none() {
            return;
        }
        if !result.is_success() {
            self.deferred.take(trans_id);
            warn!(trans = %trans_id, result = %result, "node creation rejected");
            self.status(format!("Create Node Failed ({result})"));
            return;
        }

        match self.deferred.take(trans_id) {
            Some(parent) => {
                debug!(parent = %parent, child = %node_id, "linking created node");
                let _ = self.issue(AuthRequest::VaultNodeAdd {
                    parent,
                    child: node_id,
                    owner: 0,
                });
            }
            None => {
                self.integrity_fault(format!(
                    "Orphaned node creation: {node_id} from transaction {trans_id}"
                ));
            }
        }
    }

    /// Search for nodes matching `template`.
    pub fn find_nodes(&mut self, template: VaultNode) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::VaultNodeFind { template })
    }

    pub(crate) fn on_node_find(&mut self, trans_id: TransId, result: NetResult, node_ids: Vec<NodeId>) {
        if self.settle(trans_id, RequestKind::VaultNodeFind).is_none() {
            return;
        }
        if !result.is_success() {
            self.status(format!("Find Node Failure: ({result})"));
            return;
        }
        self.status(format!("Found {} Nodes", node_ids.len()));
        self.events.emit(&ClientEvent::FoundNodes(node_ids));
    }

    pub fn add_ref(&mut self, parent: NodeId, child: NodeId, owner: u32) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::VaultNodeAdd {
            parent,
            child,
            owner,
        })
    }

    pub(crate) fn on_ref_add_reply(&mut self, trans_id: TransId, result: NetResult) {
        if self.settle(trans_id, RequestKind::VaultNodeAdd).is_none() {
            return;
        }
        if result.is_success() {
            self.status("Add Node Successful");
        } else {
            self.status(format!("Add Node Failure: ({result})"));
        }
    }

    pub fn save_node(&mut self, node: VaultNode) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::VaultNodeSave { node })
    }

    pub(crate) fn on_node_saved(&mut self, trans_id: TransId, result: NetResult) {
        if self.settle(trans_id, RequestKind::VaultNodeSave).is_none() {
            return;
        }
        if !result.is_success() {
            self.status(format!("Save Node Failure: ({result})"));
            return;
        }
        self.status("Save Node Successful");
        self.events.emit(&ClientEvent::NodeSaved(trans_id));
    }

    pub fn remove_ref(&mut self, parent: NodeId, child: NodeId) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::VaultNodeRemove { parent, child })
    }

    pub(crate) fn on_ref_remove_reply(&mut self, trans_id: TransId, result: NetResult) {
        if self.settle(trans_id, RequestKind::VaultNodeRemove).is_none() {
            return;
        }
        if result.is_success() {
            self.status("Remove Node Successful");
        } else {
            self.status(format!("Remove Node Failure: ({result})"));
        }
    }
}
