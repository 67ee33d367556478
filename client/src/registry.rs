//! Transaction registry — what each outstanding request was for.
//!
//! Every request the client sends is registered here under the id the
//! transport assigned. The reply handler takes the entry back out, which is
//! how a reply finds the buffer it writes into, and how a reply for an id
//! the client never issued (or already gave up on) is recognized.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use vaultlink_protocol::RequestKind;
use vaultlink_types::{FileItem, TransId};

use crate::DownloadBuffer;

/// Local state needed to interpret a reply.
#[derive(Debug)]
pub enum PendingKind {
    /// A file download and the buffer its chunks land in.
    Download { file: FileItem, buffer: DownloadBuffer },
    /// Any other request; only its kind is remembered.
    Request(RequestKind),
}

impl PendingKind {
    pub fn request_kind(&self) -> RequestKind {
        match self {
            Self::Download { .. } => RequestKind::FileDownload,
            Self::Request(kind) => *kind,
        }
    }
}

#[derive(Debug)]
pub struct PendingTransaction {
    pub kind: PendingKind,
    pub issued_at: Instant,
    /// Last time the server made progress on this transaction. Expiry is
    /// measured from here.
    pub last_activity: Instant,
}

#[derive(Debug, Default)]
pub struct TransactionRegistry {
    pending: HashMap<TransId, PendingTransaction>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly sent request. A reused id replaces the stale entry.
    pub fn register(&mut self, trans_id: TransId, kind: PendingKind, now: Instant) {
        self.pending.insert(
            trans_id,
            PendingTransaction {
                kind,
                issued_at: now,
                last_activity: now,
            },
        );
    }

    pub fn contains(&self, trans_id: TransId) -> bool {
        self.pending.contains_key(&trans_id)
    }

    pub fn get(&self, trans_id: TransId) -> Option<&PendingTransaction> {
        self.pending.get(&trans_id)
    }

    pub fn get_mut(&mut self, trans_id: TransId) -> Option<&mut PendingTransaction> {
        self.pending.get_mut(&trans_id)
    }

    /// Remove and return an entry (reply processed or transaction cancelled).
    pub fn take(&mut self, trans_id: TransId) -> Option<PendingTransaction> {
        self.pending.remove(&trans_id)
    }

    /// Record progress on a multi-reply transaction so it is not expired
    /// while still active. Returns whether the entry exists.
    pub fn touch(&mut self, trans_id: TransId, now: Instant) -> bool {
        match self.pending.get_mut(&trans_id) {
            Some(pending) => {
                pending.last_activity = now;
                true
            }
            None => false,
        }
    }

    /// Drop an entry without processing a reply. Returns whether it existed.
    pub fn cancel(&mut self, trans_id: TransId) -> bool {
        self.pending.remove(&trans_id).is_some()
    }

    /// Remove every entry idle for more than `timeout` before `now`, oldest
    /// id first.
    pub fn expire(
        &mut self,
        now: Instant,
        timeout: Duration,
    ) -> Vec<(TransId, PendingTransaction)> {
        let mut stale: Vec<TransId> = self
            .pending
            .iter()
            .filter(|(_, p)| now.saturating_duration_since(p.last_activity) > timeout)
            .map(|(id, _)| *id)
            .collect();
        stale.sort();
        stale
            .into_iter()
            .filter_map(|id| self.pending.remove(&id).map(|p| (id, p)))
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
