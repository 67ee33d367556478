//! Client identification sent with the register request.

use serde::{Deserialize, Serialize};
use vaultlink_types::Guid;

/// Build type the live shard expects from external clients.
pub const DEFAULT_BUILD_TYPE: u32 = 50;

/// Branch id of the live shard.
pub const DEFAULT_BRANCH_ID: u32 = 1;

/// Build id of the current live client.
pub const DEFAULT_BUILD_ID: u32 = 918;

/// Product id of the live client.
pub const LIVE_PRODUCT_ID: Guid = Guid::new([
    0xea, 0x48, 0x98, 0x21, 0x6c, 0x35, 0x4b, 0xd0, 0x9d, 0xae, 0xbb, 0x17, 0xc5, 0x85, 0xe6, 0x80,
]);

/// Identifies this client build to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub build_id: u32,
    pub build_type: u32,
    pub branch_id: u32,
    pub product_id: Guid,
}

impl ClientInfo {
    pub fn new(build_id: u32, product_id: Guid) -> Self {
        Self {
            build_id,
            build_type: DEFAULT_BUILD_TYPE,
            branch_id: DEFAULT_BRANCH_ID,
            product_id,
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_ID, LIVE_PRODUCT_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_live_shard() {
        let info = ClientInfo::default();
        assert_eq!(info.build_type, 50);
        assert_eq!(info.branch_id, 1);
        assert_eq!(
            info.product_id.to_string(),
            "ea489821-6c35-4bd0-9dae-bb17c585e680"
        );
    }
}
