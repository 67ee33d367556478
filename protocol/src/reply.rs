//! Inbound replies and server-initiated pushes.
//!
//! Every payload here is owned. Transports copy out of their receive buffers
//! before building one of these, so a reply can be queued and handled on a
//! different task than the one that read it off the socket.

use serde::{Deserialize, Serialize};
use vaultlink_types::{
    AgeInfo, FileItem, Guid, NetResult, NodeId, NodeRef, PlayerInfo, TransId, VaultNode,
};

/// A reply to a request previously sent through the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthReply {
    ClientRegister {
        trans_id: TransId,
        server_challenge: u32,
    },
    /// Streamed once per player before the login reply itself.
    AcctPlayerInfo {
        trans_id: TransId,
        player: PlayerInfo,
    },
    AcctLogin {
        trans_id: TransId,
        result: NetResult,
        account: Guid,
        encryption_key: [u32; 4],
    },
    AcctSetPlayer {
        trans_id: TransId,
        result: NetResult,
    },
    FileList {
        trans_id: TransId,
        result: NetResult,
        files: Vec<FileItem>,
    },
    FileDownloadChunk {
        trans_id: TransId,
        result: NetResult,
        total_size: u32,
        chunk_offset: u32,
        data: Vec<u8>,
    },
    PublicAgeList {
        trans_id: TransId,
        result: NetResult,
        ages: Vec<AgeInfo>,
    },
    Age {
        trans_id: TransId,
        result: NetResult,
        mcp_id: u32,
        instance_id: Guid,
        vault_id: u32,
        game_server_address: u32,
    },
    VaultNodeRefsFetched {
        trans_id: TransId,
        result: NetResult,
        refs: Vec<NodeRef>,
    },
    VaultNodeFetched {
        trans_id: TransId,
        result: NetResult,
        node: VaultNode,
    },
    VaultNodeCreated {
        trans_id: TransId,
        result: NetResult,
        node_id: NodeId,
    },
    VaultNodeFind {
        trans_id: TransId,
        result: NetResult,
        node_ids: Vec<NodeId>,
    },
    VaultNodeSave {
        trans_id: TransId,
        result: NetResult,
    },
    VaultNodeAdd {
        trans_id: TransId,
        result: NetResult,
    },
    VaultNodeRemove {
        trans_id: TransId,
        result: NetResult,
    },
}

impl AuthReply {
    pub fn trans_id(&self) -> TransId {
        match self {
            Self::ClientRegister { trans_id, .. }
            | Self::AcctPlayerInfo { trans_id, .. }
            | Self::AcctLogin { trans_id, .. }
            | Self::AcctSetPlayer { trans_id, .. }
            | Self::FileList { trans_id, .. }
            | Self::FileDownloadChunk { trans_id, .. }
            | Self::PublicAgeList { trans_id, .. }
            | Self::Age { trans_id, .. }
            | Self::VaultNodeRefsFetched { trans_id, .. }
            | Self::VaultNodeFetched { trans_id, .. }
            | Self::VaultNodeCreated { trans_id, .. }
            | Self::VaultNodeFind { trans_id, .. }
            | Self::VaultNodeSave { trans_id, .. }
            | Self::VaultNodeAdd { trans_id, .. }
            | Self::VaultNodeRemove { trans_id, .. } => *trans_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ClientRegister { .. } => "client_register",
            Self::AcctPlayerInfo { .. } => "acct_player_info",
            Self::AcctLogin { .. } => "acct_login",
            Self::AcctSetPlayer { .. } => "acct_set_player",
            Self::FileList { .. } => "file_list",
            Self::FileDownloadChunk { .. } => "file_download_chunk",
            Self::PublicAgeList { .. } => "public_age_list",
            Self::Age { .. } => "age",
            Self::VaultNodeRefsFetched { .. } => "vault_node_refs_fetched",
            Self::VaultNodeFetched { .. } => "vault_node_fetched",
            Self::VaultNodeCreated { .. } => "vault_node_created",
            Self::VaultNodeFind { .. } => "vault_node_find",
            Self::VaultNodeSave { .. } => "vault_node_save",
            Self::VaultNodeAdd { .. } => "vault_node_add",
            Self::VaultNodeRemove { .. } => "vault_node_remove",
        }
    }
}

/// A notification the server sends without a matching request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultPush {
    NodeChanged { node_id: NodeId, revision: Guid },
    NodeAdded { parent: NodeId, child: NodeId, owner: u32 },
    NodeRemoved { parent: NodeId, child: NodeId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trans_id_is_extracted_from_every_shape() {
        let reply = AuthReply::FileDownloadChunk {
            trans_id: TransId(9),
            result: NetResult::Success,
            total_size: 10,
            chunk_offset: 0,
            data: vec![0; 10],
        };
        assert_eq!(reply.trans_id(), TransId(9));
        assert_eq!(reply.name(), "file_download_chunk");

        let reply = AuthReply::ClientRegister {
            trans_id: TransId(1),
            server_challenge: 42,
        };
        assert_eq!(reply.trans_id(), TransId(1));
    }
}
