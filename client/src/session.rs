//! Login session state.

use std::fmt;

use vaultlink_types::{Guid, PlayerInfo};

/// Progress through the login handshake. Ordered: later stages compare
/// greater, so "at least logged in" is `state >= PlayerSelectionAvailable`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginState {
    #[default]
    Disconnected,
    Connecting,
    Registering,
    Authenticating,
    PlayerSelectionAvailable,
    PlayerSelected,
    VaultRootRequested,
    Ready,
}

impl LoginState {
    pub fn is_logged_in(&self) -> bool {
        *self >= Self::PlayerSelectionAvailable
    }
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Registering => "registering",
            Self::Authenticating => "authenticating",
            Self::PlayerSelectionAvailable => "player_selection_available",
            Self::PlayerSelected => "player_selected",
            Self::VaultRootRequested => "vault_root_requested",
            Self::Ready => "ready",
        };
        f.write_str(s)
    }
}

/// Account credentials. The username is stored lowercased.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_lowercase(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub state: LoginState,
    pub credentials: Credentials,
    /// Selected player; 0 until `set_player`.
    pub player_id: u32,
    pub account: Option<Guid>,
    /// Players announced by the server, in arrival order.
    pub players: Vec<PlayerInfo>,
}

impl Session {
    /// Start over for a new login attempt.
    pub fn reset(&mut self, username: &str, password: &str) {
        *self = Self {
            credentials: Credentials::new(username, password),
            ..Self::default()
        };
    }
}
