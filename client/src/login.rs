//! Login handshake: connect, register, challenge login, player selection.
//!
//! Each step is only unblocked by the reply to the previous one. The flow
//! ends in [`LoginState::Ready`] once the selected player's vault node has
//! been fetched.

use tracing::{debug, info, warn};
use vaultlink_protocol::{AuthRequest, AuthTransport, RequestKind};
use vaultlink_store::VaultGraph;
use vaultlink_types::{Guid, NetResult, NodeId, PlayerInfo, TransId};

use crate::{AuthClient, ClientError, ClientEvent, LoginState};

const SDL_DIRECTORY: &str = "SDL";
const SDL_EXTENSION: &str = "sdl";

impl<T: AuthTransport, G: VaultGraph> AuthClient<T, G> {
    /// Begin a new session.
    ///
    /// Drops all state from any previous session, connects, and sends the
    /// register request. A connection failure is reported as a status and
    /// returned; nothing is left pending.
    pub fn start_login(&mut self, username: &str, password: &str) -> Result<TransId, ClientError> {
        self.session.reset(username, password);
        self.registry.clear();
        self.fetch_set.invalidate();
        self.downloads.clear();
        self.deferred.clear();
        self.update_pending_gauge();

        info!(
            user = %self.session.credentials.username,
            host = %self.config.host,
            port = self.config.port,
            "starting login"
        );
        self.status("Connecting...");
        self.session.state = LoginState::Connecting;

        if let Err(err) = self.transport.connect(&self.config.host, self.config.port) {
            warn!(error = %err, "connect failed");
            self.session.state = LoginState::Disconnected;
            self.status("Error Connecting To Server");
            return Err(ClientError::Connect(err));
        }

        self.session.state = LoginState::Registering;
        let info = self.config.client_info();
        match self.issue(AuthRequest::ClientRegister { info }) {
            Ok(trans_id) => Ok(trans_id),
            Err(err) => {
                self.session.state = LoginState::Disconnected;
                Err(err)
            }
        }
    }

    pub(crate) fn on_client_register(&mut self, trans_id: TransId, server_challenge: u32) {
        if self.settle(trans_id, RequestKind::ClientRegister).is_none() {
            return;
        }

        self.session.state = LoginState::Authenticating;
        self.status("Authenticating...");

        let request = AuthRequest::AcctLogin {
            server_challenge,
            client_challenge: self.nonces.next_nonce(),
            username: self.session.credentials.username.clone(),
            password: self.session.credentials.password.clone(),
        };
        // Send failures are already reported as a status.
        let _ = self.issue(request);
    }

    /// Player records arrive ahead of the login reply and share its
    /// transaction, so they do not resolve anything.
    pub(crate) fn on_player_info(&mut self, player: PlayerInfo) {
        debug!(player_id = player.player_id, name = %player.name, "player available");
        self.session.players.push(player.clone());
        self.events.emit(&ClientEvent::PlayerAvailable(player));
    }

    pub(crate) fn on_acct_login(
        &mut self,
        trans_id: TransId,
        result: NetResult,
        account: Guid,
        encryption_key: [u32; 4],
    ) {
        if self.settle(trans_id, RequestKind::AcctLogin).is_none() {
            return;
        }
        if !result.is_success() {
            warn!(result = %result, "login rejected");
            self.status(format!("Auth Failed ({result})"));
            return;
        }

        self.status("Auth Successful");
        self.session.account = Some(account);
        self.session.state = LoginState::PlayerSelectionAvailable;
        info!(account = %account, players = self.session.players.len(), "logged in");

        let _ = self.request_file_list(SDL_DIRECTORY, SDL_EXTENSION);

        self.events.emit(&ClientEvent::EncryptionKeys(encryption_key));
        self.events.emit(&ClientEvent::LoginSuccessful);
    }

    /// Choose which player to continue as. Only valid once login succeeded.
    pub fn set_player(&mut self, player_id: u32) -> Result<TransId, ClientError> {
        if !self.session.state.is_logged_in() {
            self.status("Cannot select a player before logging in");
            return Err(ClientError::NotLoggedIn);
        }

        self.session.player_id = player_id;
        let trans_id = self.issue(AuthRequest::AcctSetPlayer { player_id })?;
        self.session.state = LoginState::PlayerSelected;
        Ok(trans_id)
    }

    pub(crate) fn on_acct_set_player(&mut self, trans_id: TransId, result: NetResult) {
        if self.settle(trans_id, RequestKind::AcctSetPlayer).is_none() {
            return;
        }
        if !result.is_success() {
            warn!(result = %result, player_id = self.session.player_id, "set player rejected");
            self.status(format!("Set Player Failed ({result})"));
            return;
        }

        let root = NodeId(self.session.player_id);
        info!(player_id = root.0, "player selected, fetching vault root");
        self.session.state = LoginState::VaultRootRequested;
        self.vault.queue_root(root);
        self.fetch_set.insert_if_absent(root);
        let _ = self.request_node_fetch(root);
    }
}
