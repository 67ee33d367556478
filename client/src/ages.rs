//! Public age listings and age join requests.

use tracing::{debug, info};
use vaultlink_protocol::{AuthRequest, AuthTransport, RequestKind};
use vaultlink_store::VaultGraph;
use vaultlink_types::{AgeInfo, AgeLink, Guid, NetResult, TransId};

use crate::{AuthClient, ClientError, ClientEvent};

impl<T: AuthTransport, G: VaultGraph> AuthClient<T, G> {
    /// List public instances of the age stored in `filename`.
    pub fn request_public_ages(&mut self, filename: &str) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::GetPublicAgeList {
            filename: filename.to_string(),
        })
    }

    pub(crate) fn on_public_age_list(&mut self, trans_id: TransId, result: NetResult, ages: Vec<AgeInfo>) {
        if self.settle(trans_id, RequestKind::GetPublicAgeList).is_none() {
            return;
        }
        if !result.is_success() {
            self.status(format!("Get Public Ages Failed ({result})"));
            return;
        }
        debug!(ages = ages.len(), "public ages received");
        self.status(format!("Got {} Public Ages", ages.len()));
        self.events.emit(&ClientEvent::PublicAges(ages));
    }

    /// Ask the server where to find an age instance.
    pub fn request_age(&mut self, age_name: &str, instance_id: Guid) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::AgeRequest {
            age_name: age_name.to_string(),
            instance_id,
        })
    }

    pub(crate) fn on_age_reply(
        &mut self,
        trans_id: TransId,
        result: NetResult,
        mcp_id: u32,
        instance_id: Guid,
        vault_id: u32,
        game_server_address: u32,
    ) {
        if self.settle(trans_id, RequestKind::AgeRequest).is_none() {
            return;
        }
        if !result.is_success() {
            self.status(format!("Age Request Failed: ({result})"));
            return;
        }

        let link = AgeLink::from_raw_address(game_server_address, instance_id, mcp_id, vault_id);
        info!(server = %link.game_server, instance = %instance_id, "age request granted");
        self.status("Age Request Successful");
        self.events.emit(&ClientEvent::AgeJoined(link));
    }
}
