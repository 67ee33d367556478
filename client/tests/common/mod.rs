//! Shared wiring for the integration tests: a client over nullable
//! collaborators plus helpers that walk it through the login handshake.

#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::mpsc;
use vaultlink_client::{AuthClient, ClientConfig, ClientEvent, ClientMetrics};
use vaultlink_nullables::{NullRandom, NullTransport, NullVault};
use vaultlink_protocol::{AuthReply, RequestKind};
use vaultlink_types::{Guid, NetResult, NodeId, PlayerInfo, TransId, VaultNode};

pub const SERVER_CHALLENGE: u32 = 42;
pub const CLIENT_NONCE: u32 = 1234;
pub const SESSION_KEY: [u32; 4] = [1, 2, 3, 4];

pub struct Harness {
    pub client: AuthClient<NullTransport, NullVault>,
    pub transport: NullTransport,
    pub vault: NullVault,
    pub events: mpsc::UnboundedReceiver<ClientEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::build(config, None)
    }

    pub fn with_metrics(metrics: Arc<ClientMetrics>) -> Self {
        Self::build(ClientConfig::default(), Some(metrics))
    }

    fn build(config: ClientConfig, metrics: Option<Arc<ClientMetrics>>) -> Self {
        let transport = NullTransport::new();
        let vault = NullVault::new();
        let mut client = AuthClient::new(config, transport.clone(), vault.clone())
            .with_nonce_source(NullRandom::constant(CLIENT_NONCE));
        if let Some(metrics) = metrics {
            client = client.with_metrics(metrics);
        }
        let events = client.event_channel();
        Self {
            client,
            transport,
            vault,
            events,
        }
    }

    /// Everything emitted since the last drain.
    pub fn drain(&mut self) -> Vec<ClientEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }

    pub fn statuses(&mut self) -> Vec<String> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                ClientEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn last_trans(&self, kind: RequestKind) -> TransId {
        self.transport
            .last_of(kind)
            .unwrap_or_else(|| panic!("no {} request sent", kind.as_str()))
            .0
    }

    /// Connect and register only; the client can now send requests.
    pub fn connect(&mut self) -> TransId {
        self.client.start_login("Tester", "secret").expect("connect")
    }

    /// Run the handshake through a successful login. Returns the id of the
    /// file list request the login triggered.
    pub fn login(&mut self) -> TransId {
        let register = self.connect();
        self.client.handle_reply(AuthReply::ClientRegister {
            trans_id: register,
            server_challenge: SERVER_CHALLENGE,
        });
        let login = self.last_trans(RequestKind::AcctLogin);
        self.client.handle_reply(AuthReply::AcctPlayerInfo {
            trans_id: login,
            player: player(7, "Seven"),
        });
        self.client.handle_reply(AuthReply::AcctLogin {
            trans_id: login,
            result: NetResult::Success,
            account: Guid::NULL,
            encryption_key: SESSION_KEY,
        });
        self.last_trans(RequestKind::FileList)
    }

    /// Log in, select `player_id`, and deliver the root node.
    pub fn login_ready(&mut self, player_id: u32) {
        self.login();
        let set_player = self.client.set_player(player_id).expect("set player");
        self.client.handle_reply(AuthReply::AcctSetPlayer {
            trans_id: set_player,
            result: NetResult::Success,
        });
        let fetch = self.last_trans(RequestKind::VaultNodeFetch);
        self.client.handle_reply(AuthReply::VaultNodeFetched {
            trans_id: fetch,
            result: NetResult::Success,
            node: node(player_id),
        });
    }
}

pub fn player(player_id: u32, name: &str) -> PlayerInfo {
    PlayerInfo {
        player_id,
        name: name.to_string(),
        avatar: "female".to_string(),
        explorer: 1,
    }
}

pub fn node(id: u32) -> VaultNode {
    VaultNode {
        node_id: NodeId(id),
        node_type: 2,
        ..VaultNode::default()
    }
}
