//! The client state machine.
//!
//! [`AuthClient`] owns the transport, the graph store, and all bookkeeping
//! (session, transaction registry, fetch set, download queue, deferred
//! links). Handlers for each protocol area live in their own modules as
//! further `impl` blocks: [`login`](crate::login), [`transfer`](crate::transfer),
//! [`vault_sync`](crate::vault_sync) and [`ages`](crate::ages).
//!
//! Every outbound request goes through [`AuthClient::issue`], which is the
//! only place transactions are registered. Every reply enters through
//! [`AuthClient::handle_reply`].

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, warn};
use vaultlink_protocol::{
    AuthReply, AuthRequest, AuthTransport, NonceSource, RequestKind, ThreadRngNonce, VaultPush,
};
use vaultlink_store::VaultGraph;
use vaultlink_types::{Guid, PlayerInfo, TransId};

use crate::tracing_spans::{push_span, reply_span};
use crate::{
    ClientConfig, ClientError, ClientEvent, ClientMetrics, DeferredLinks, DownloadQueue, EventBus,
    FetchSet, LoginState, PendingKind, PendingTransaction, Session, TransactionRegistry,
};

pub struct AuthClient<T: AuthTransport, G: VaultGraph> {
    pub(crate) config: ClientConfig,
    pub(crate) transport: T,
    pub(crate) vault: G,
    pub(crate) nonces: Box<dyn NonceSource>,
    pub(crate) events: EventBus,
    pub(crate) session: Session,
    pub(crate) registry: TransactionRegistry,
    pub(crate) fetch_set: FetchSet,
    pub(crate) downloads: DownloadQueue,
    pub(crate) deferred: DeferredLinks,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl<T: AuthTransport, G: VaultGraph> AuthClient<T, G> {
    pub fn new(config: ClientConfig, transport: T, vault: G) -> Self {
        Self {
            config,
            transport,
            vault,
            nonces: Box::new(ThreadRngNonce),
            events: EventBus::new(),
            session: Session::default(),
            registry: TransactionRegistry::new(),
            fetch_set: FetchSet::new(),
            downloads: DownloadQueue::new(),
            deferred: DeferredLinks::new(),
            metrics: None,
        }
    }

    /// Replace the source of client challenges sent at login.
    pub fn with_nonce_source(mut self, nonces: impl NonceSource + 'static) -> Self {
        self.nonces = Box::new(nonces);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ClientEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Subscribe a channel and return the receiving end.
    pub fn event_channel(&mut self) -> mpsc::UnboundedReceiver<ClientEvent> {
        self.events.channel()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> LoginState {
        self.session.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn players(&self) -> &[PlayerInfo] {
        &self.session.players
    }

    pub fn player_id(&self) -> u32 {
        self.session.player_id
    }

    pub fn account(&self) -> Option<Guid> {
        self.session.account
    }

    pub fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }

    pub fn fetch_set(&self) -> &FetchSet {
        &self.fetch_set
    }

    /// Forget which nodes have been fetched; later traversal starts over.
    pub fn invalidate_fetch_set(&mut self) {
        self.fetch_set.invalidate();
    }

    pub fn downloads(&self) -> &DownloadQueue {
        &self.downloads
    }

    pub fn deferred(&self) -> &DeferredLinks {
        &self.deferred
    }

    pub fn vault(&self) -> &G {
        &self.vault
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and register it under the id the transport assigned.
    pub(crate) fn issue(&mut self, request: AuthRequest) -> Result<TransId, ClientError> {
        let kind = request.kind();
        self.issue_as(request, PendingKind::Request(kind))
    }

    /// Like [`issue`](Self::issue), with explicit local state for the reply.
    pub(crate) fn issue_as(
        &mut self,
        request: AuthRequest,
        pending: PendingKind,
    ) -> Result<TransId, ClientError> {
        let kind = request.kind();
        match self.transport.send(request) {
            Ok(trans_id) => {
                self.registry.register(trans_id, pending, Instant::now());
                debug!(trans = %trans_id, request = kind.as_str(), "request sent");
                if let Some(metrics) = &self.metrics {
                    metrics.requests_sent.inc();
                }
                self.update_pending_gauge();
                Ok(trans_id)
            }
            Err(err) => {
                warn!(request = kind.as_str(), error = %err, "send failed");
                self.status(format!("Send Failed ({err})"));
                Err(err.into())
            }
        }
    }

    /// Resolve the transaction a reply answers.
    ///
    /// Returns `None` (after reporting an integrity fault) when the id is not
    /// registered or was registered for a different request.
    pub(crate) fn settle(
        &mut self,
        trans_id: TransId,
        expected: RequestKind,
    ) -> Option<PendingTransaction> {
        let Some(pending) = self.registry.take(trans_id) else {
            self.integrity_fault(format!(
                "Reply for unknown transaction {trans_id} (expected {})",
                expected.as_str()
            ));
            return None;
        };
        let actual = pending.kind.request_kind();
        if actual != expected {
            self.registry
                .register(trans_id, pending.kind, pending.last_activity);
            self.integrity_fault(format!(
                "Reply for transaction {trans_id} does not match request ({} vs {})",
                expected.as_str(),
                actual.as_str()
            ));
            return None;
        }
        self.update_pending_gauge();
        Some(pending)
    }

    pub(crate) fn status(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(status = %message);
        self.events.emit(&ClientEvent::Status(message));
    }

    pub(crate) fn integrity_fault(&self, message: String) {
        warn!(fault = %message, "integrity fault");
        self.events.emit(&ClientEvent::Status(message.clone()));
        self.events.emit(&ClientEvent::IntegrityFault(message));
    }

    pub(crate) fn update_pending_gauge(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.pending_transactions.set(self.registry.len() as i64);
        }
    }

    /// Dispatch one reply from the transport.
    pub fn handle_reply(&mut self, reply: AuthReply) {
        let span = reply_span(reply.name(), reply.trans_id());
        let _enter = span.enter();
        if let Some(metrics) = &self.metrics {
            metrics.replies_handled.inc();
        }

        match reply {
            AuthReply::ClientRegister {
                trans_id,
                server_challenge,
            } => self.on_client_register(trans_id, server_challenge),
            AuthReply::AcctPlayerInfo { player, .. } => self.on_player_info(player),
            AuthReply::AcctLogin {
                trans_id,
                result,
                account,
                encryption_key,
            } => self.on_acct_login(trans_id, result, account, encryption_key),
            AuthReply::AcctSetPlayer { trans_id, result } => {
                self.on_acct_set_player(trans_id, result)
            }
            AuthReply::FileList {
                trans_id,
                result,
                files,
            } => self.on_file_list(trans_id, result, files),
            AuthReply::FileDownloadChunk {
                trans_id,
                result,
                total_size,
                chunk_offset,
                data,
            } => self.on_file_download_chunk(trans_id, result, total_size, chunk_offset, &data),
            AuthReply::PublicAgeList {
                trans_id,
                result,
                ages,
            } => self.on_public_age_list(trans_id, result, ages),
            AuthReply::Age {
                trans_id,
                result,
                mcp_id,
                instance_id,
                vault_id,
                game_server_address,
            } => self.on_age_reply(
                trans_id,
                result,
                mcp_id,
                instance_id,
                vault_id,
                game_server_address,
            ),
            AuthReply::VaultNodeRefsFetched {
                trans_id,
                result,
                refs,
            } => self.on_node_refs_fetched(trans_id, result, refs),
            AuthReply::VaultNodeFetched {
                trans_id,
                result,
                node,
            } => self.on_node_fetched(trans_id, result, node),
            AuthReply::VaultNodeCreated {
                trans_id,
                result,
                node_id,
            } => self.on_node_created(trans_id, result, node_id),
            AuthReply::VaultNodeFind {
                trans_id,
                result,
                node_ids,
            } => self.on_node_find(trans_id, result, node_ids),
            AuthReply::VaultNodeSave { trans_id, result } => self.on_node_saved(trans_id, result),
            AuthReply::VaultNodeAdd { trans_id, result } => self.on_ref_add_reply(trans_id, result),
            AuthReply::VaultNodeRemove { trans_id, result } => {
                self.on_ref_remove_reply(trans_id, result)
            }
        }
    }

    /// Dispatch one server-initiated vault notification.
    pub fn handle_push(&mut self, push: VaultPush) {
        let kind = match &push {
            VaultPush::NodeChanged { .. } => "node_changed",
            VaultPush::NodeAdded { .. } => "node_added",
            VaultPush::NodeRemoved { .. } => "node_removed",
        };
        let span = push_span(kind);
        let _enter = span.enter();

        match push {
            VaultPush::NodeChanged { node_id, revision } => self.on_node_changed(node_id, revision),
            VaultPush::NodeAdded {
                parent,
                child,
                owner,
            } => self.on_ref_pushed(parent, child, owner),
            VaultPush::NodeRemoved { parent, child } => self.on_unref_pushed(parent, child),
        }
    }

    /// Drop every transaction that has waited longer than the configured
    /// timeout, undoing whatever local state depended on it. Returns how many
    /// were expired.
    pub fn expire_transactions(&mut self, now: Instant) -> usize {
        let expired = self
            .registry
            .expire(now, self.config.transaction_timeout());
        let count = expired.len();

        for (trans_id, pending) in expired {
            match pending.kind {
                PendingKind::Download { file, .. } => {
                    if self.downloads.in_flight() == Some(trans_id) {
                        self.downloads.clear_in_flight();
                    }
                    warn!(trans = %trans_id, file = %file.name, "download timed out");
                    self.status(format!("File download timed out ({})", file.name));
                }
                PendingKind::Request(kind) => {
                    if kind == RequestKind::VaultNodeCreate {
                        self.deferred.take(trans_id);
                    }
                    warn!(trans = %trans_id, request = kind.as_str(), "request timed out");
                    self.status(format!("Request timed out: {} {trans_id}", kind.as_str()));
                }
            }
            if let Some(metrics) = &self.metrics {
                metrics.transactions_expired.inc();
            }
        }

        if count > 0 {
            self.update_pending_gauge();
        }
        count
    }
}
