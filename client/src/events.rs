//! Notifications the client emits for its embedding application.

use std::io::Cursor;

use tokio::sync::mpsc;
use vaultlink_types::{AgeInfo, AgeLink, NodeId, PlayerInfo, TransId};

/// Everything the client reports. Payloads are owned copies, safe to move to
/// another task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// Human-readable progress or failure line.
    Status(String),
    LoginSuccessful,
    /// Session encryption material negotiated at login.
    EncryptionKeys([u32; 4]),
    PlayerAvailable(PlayerInfo),
    PublicAges(Vec<AgeInfo>),
    FoundNodes(Vec<NodeId>),
    NodeSaved(TransId),
    /// A queued file finished downloading; `data` is positioned at the start.
    FileDownloaded {
        name: String,
        data: Cursor<Vec<u8>>,
    },
    AgeJoined(AgeLink),
    /// Bookkeeping disagreed with what the server sent (unknown transaction,
    /// chunk overflow, orphaned node creation). Always paired with a status.
    IntegrityFault(String),
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline while the client is mid-handler and hold no
/// reference to it, so they cannot issue requests back into it. Use
/// [`EventBus::channel`] to hand events to another task.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&ClientEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ClientEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    /// Subscribe an unbounded channel and return its receiving end.
    pub fn channel(&mut self) -> mpsc::UnboundedReceiver<ClientEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(Box::new(move |event| {
            // A dropped receiver just stops listening.
            let _ = tx.send(event.clone());
        }));
        rx
    }

    pub fn emit(&self, event: &ClientEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
