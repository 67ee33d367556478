//! Selectable player records returned during login.

use serde::{Deserialize, Serialize};

/// A player (in-game persona) attached to the authenticated account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player_id: u32,
    pub name: String,
    pub avatar: String,
    pub explorer: u32,
}
