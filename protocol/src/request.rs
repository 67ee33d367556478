//! Outbound requests.

use serde::{Deserialize, Serialize};
use vaultlink_types::{Guid, NodeId, VaultNode};

use crate::ClientInfo;

/// A request the client asks the transport to send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthRequest {
    ClientRegister {
        info: ClientInfo,
    },
    AcctLogin {
        server_challenge: u32,
        client_challenge: u32,
        username: String,
        password: String,
    },
    AcctSetPlayer {
        player_id: u32,
    },
    FileList {
        directory: String,
        extension: String,
    },
    FileDownload {
        filename: String,
    },
    GetPublicAgeList {
        filename: String,
    },
    AgeRequest {
        age_name: String,
        instance_id: Guid,
    },
    VaultNodeFetch {
        node_id: NodeId,
    },
    VaultFetchNodeRefs {
        node_id: NodeId,
    },
    VaultNodeCreate {
        node: VaultNode,
    },
    VaultNodeFind {
        template: VaultNode,
    },
    VaultNodeSave {
        node: VaultNode,
    },
    VaultNodeAdd {
        parent: NodeId,
        child: NodeId,
        owner: u32,
    },
    VaultNodeRemove {
        parent: NodeId,
        child: NodeId,
    },
}

/// Payload-free discriminant of [`AuthRequest`], used to remember what a
/// pending transaction was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    ClientRegister,
    AcctLogin,
    AcctSetPlayer,
    FileList,
    FileDownload,
    GetPublicAgeList,
    AgeRequest,
    VaultNodeFetch,
    VaultFetchNodeRefs,
    VaultNodeCreate,
    VaultNodeFind,
    VaultNodeSave,
    VaultNodeAdd,
    VaultNodeRemove,
}

impl AuthRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::ClientRegister { .. } => RequestKind::ClientRegister,
            Self::AcctLogin { .. } => RequestKind::AcctLogin,
            Self::AcctSetPlayer { .. } => RequestKind::AcctSetPlayer,
            Self::FileList { .. } => RequestKind::FileList,
            Self::FileDownload { .. } => RequestKind::FileDownload,
            Self::GetPublicAgeList { .. } => RequestKind::GetPublicAgeList,
            Self::AgeRequest { .. } => RequestKind::AgeRequest,
            Self::VaultNodeFetch { .. } => RequestKind::VaultNodeFetch,
            Self::VaultFetchNodeRefs { .. } => RequestKind::VaultFetchNodeRefs,
            Self::VaultNodeCreate { .. } => RequestKind::VaultNodeCreate,
            Self::VaultNodeFind { .. } => RequestKind::VaultNodeFind,
            Self::VaultNodeSave { .. } => RequestKind::VaultNodeSave,
            Self::VaultNodeAdd { .. } => RequestKind::VaultNodeAdd,
            Self::VaultNodeRemove { .. } => RequestKind::VaultNodeRemove,
        }
    }
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientRegister => "client_register",
            Self::AcctLogin => "acct_login",
            Self::AcctSetPlayer => "acct_set_player",
            Self::FileList => "file_list",
            Self::FileDownload => "file_download",
            Self::GetPublicAgeList => "get_public_age_list",
            Self::AgeRequest => "age_request",
            Self::VaultNodeFetch => "vault_node_fetch",
            Self::VaultFetchNodeRefs => "vault_fetch_node_refs",
            Self::VaultNodeCreate => "vault_node_create",
            Self::VaultNodeFind => "vault_node_find",
            Self::VaultNodeSave => "vault_node_save",
            Self::VaultNodeAdd => "vault_node_add",
            Self::VaultNodeRemove => "vault_node_remove",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let req = AuthRequest::VaultNodeFetch { node_id: NodeId(5) };
        assert_eq!(req.kind(), RequestKind::VaultNodeFetch);
        assert_eq!(req.kind().as_str(), "vault_node_fetch");

        let req = AuthRequest::FileList {
            directory: "SDL".into(),
            extension: "sdl".into(),
        };
        assert_eq!(req.kind(), RequestKind::FileList);
    }
}
