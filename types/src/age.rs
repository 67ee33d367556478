//! Age descriptors: public age listings and age-join results.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::Guid;

/// One entry of a public age listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeInfo {
    pub filename: String,
    pub instance_id: Guid,
}

/// Where to go after a successful age request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeLink {
    pub game_server: Ipv4Addr,
    pub instance_id: Guid,
    pub mcp_id: u32,
    pub vault_id: u32,
}

impl AgeLink {
    /// Build from the raw big-endian server address carried on the wire.
    pub fn from_raw_address(address: u32, instance_id: Guid, mcp_id: u32, vault_id: u32) -> Self {
        Self {
            game_server: Ipv4Addr::from(address),
            instance_id,
            mcp_id,
            vault_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_address_is_big_endian() {
        let link = AgeLink::from_raw_address(0x7f00_0001, Guid::NULL, 1, 2);
        assert_eq!(link.game_server, Ipv4Addr::new(127, 0, 0, 1));
    }
}
