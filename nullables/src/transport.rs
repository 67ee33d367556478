//! Nullable transport — record requests without sending them.

use std::sync::{Arc, Mutex};

use vaultlink_protocol::{AuthRequest, AuthTransport, ProtocolError, RequestKind};
use vaultlink_types::TransId;

#[derive(Default)]
struct State {
    connected: Option<(String, u16)>,
    fail_connect: bool,
    fail_send: bool,
    next_id: u32,
    sent: Vec<(TransId, AuthRequest)>,
}

/// A transport that hands out sequential transaction ids (starting at 1)
/// and records every request instead of sending it.
#[derive(Clone, Default)]
pub struct NullTransport {
    state: Arc<Mutex<State>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `connect` calls fail.
    pub fn fail_connect(&self, fail: bool) {
        self.state.lock().unwrap().fail_connect = fail;
    }

    /// Make the next `send` calls fail.
    pub fn fail_send(&self, fail: bool) {
        self.state.lock().unwrap().fail_send = fail;
    }

    /// Where the last successful `connect` went.
    pub fn connected_to(&self) -> Option<(String, u16)> {
        self.state.lock().unwrap().connected.clone()
    }

    /// All requests "sent" so far, with their transaction ids.
    pub fn sent(&self) -> Vec<(TransId, AuthRequest)> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Only the requests of one kind.
    pub fn sent_of(&self, kind: RequestKind) -> Vec<(TransId, AuthRequest)> {
        self.state
            .lock()
            .unwrap()
            .sent
            .iter()
            .filter(|(_, req)| req.kind() == kind)
            .cloned()
            .collect()
    }

    /// The most recent request of one kind.
    pub fn last_of(&self, kind: RequestKind) -> Option<(TransId, AuthRequest)> {
        self.sent_of(kind).pop()
    }

    /// The id the next `send` will return.
    pub fn peek_next_id(&self) -> TransId {
        TransId(self.state.lock().unwrap().next_id + 1)
    }

    /// Forget recorded requests (ids keep counting up).
    pub fn clear_sent(&self) {
        self.state.lock().unwrap().sent.clear();
    }
}

impl AuthTransport for NullTransport {
    fn connect(&mut self, host: &str, port: u16) -> Result<(), ProtocolError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_connect {
            return Err(ProtocolError::ConnectFailed {
                host: host.to_string(),
                port,
                reason: "null transport refused".into(),
            });
        }
        state.connected = Some((host.to_string(), port));
        Ok(())
    }

    fn send(&mut self, request: AuthRequest) -> Result<TransId, ProtocolError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_send {
            return Err(ProtocolError::SendFailed("null transport refused".into()));
        }
        if state.connected.is_none() {
            return Err(ProtocolError::NotConnected);
        }
        state.next_id += 1;
        let id = TransId(state.next_id);
        state.sent.push((id, request));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultlink_types::NodeId;

    fn fetch(id: u32) -> AuthRequest {
        AuthRequest::VaultNodeFetch {
            node_id: NodeId(id),
        }
    }

    #[test]
    fn assigns_sequential_ids() {
        let mut t = NullTransport::new();
        t.connect("localhost", 14617).unwrap();
        assert_eq!(t.peek_next_id(), TransId(1));
        assert_eq!(t.send(fetch(1)).unwrap(), TransId(1));
        assert_eq!(t.send(fetch(2)).unwrap(), TransId(2));
        assert_eq!(t.sent().len(), 2);
    }

    #[test]
    fn send_requires_connection() {
        let mut t = NullTransport::new();
        assert!(matches!(t.send(fetch(1)), Err(ProtocolError::NotConnected)));
    }

    #[test]
    fn connect_failure_is_reported() {
        let mut t = NullTransport::new();
        t.fail_connect(true);
        assert!(t.connect("localhost", 1).is_err());
        assert!(t.connected_to().is_none());
    }

    #[test]
    fn clones_share_state() {
        let observer = NullTransport::new();
        let mut t = observer.clone();
        t.connect("localhost", 1).unwrap();
        t.send(fetch(3)).unwrap();
        assert_eq!(observer.sent_of(RequestKind::VaultNodeFetch).len(), 1);
        assert_eq!(observer.connected_to(), Some(("localhost".to_string(), 1)));
    }
}
