//! The dispatch service task.

mod common;

use std::time::Duration;

use tokio::sync::mpsc;
use vaultlink_client::{
    AuthClient, ClientConfig, ClientError, ClientEvent, ClientHandle, ClientService, LoginState,
};
use vaultlink_nullables::{NullRandom, NullTransport, NullVault};
use vaultlink_protocol::{AuthReply, RequestKind, VaultPush};
use vaultlink_types::{NodeId, TransId};

fn spawn(
    config: ClientConfig,
) -> (
    ClientHandle,
    tokio::task::JoinHandle<AuthClient<NullTransport, NullVault>>,
    NullTransport,
    NullVault,
    mpsc::UnboundedReceiver<ClientEvent>,
) {
    let transport = NullTransport::new();
    let vault = NullVault::new();
    let mut client = AuthClient::new(config.clone(), transport.clone(), vault.clone())
        .with_nonce_source(NullRandom::constant(common::CLIENT_NONCE));
    let events = client.event_channel();
    let (handle, task) = ClientService::spawn(client, &config);
    (handle, task, transport, vault, events)
}

#[tokio::test]
async fn inputs_are_applied_in_order() {
    let (handle, task, transport, _, _) = spawn(ClientConfig::default());

    handle.start_login("Tester", "secret").await.unwrap();
    // The register request is the first send, so it gets id 1.
    handle
        .deliver_reply(AuthReply::ClientRegister {
            trans_id: TransId(1),
            server_challenge: common::SERVER_CHALLENGE,
        })
        .await
        .unwrap();
    handle.shutdown();

    let client = task.await.unwrap();
    assert_eq!(client.state(), LoginState::Authenticating);
    assert!(transport.last_of(RequestKind::AcctLogin).is_some());
}

#[tokio::test]
async fn pushes_reach_the_vault() {
    let (handle, task, transport, vault, mut events) = spawn(ClientConfig::default());

    handle.start_login("tester", "secret").await.unwrap();
    handle
        .deliver_push(VaultPush::NodeAdded {
            parent: NodeId(1),
            child: NodeId(2),
            owner: 0,
        })
        .await
        .unwrap();
    drop(handle);

    let client = task.await.unwrap();
    assert!(vault.has_ref(NodeId(1), NodeId(2)));
    assert_eq!(transport.sent_of(RequestKind::VaultNodeFetch).len(), 2);
    assert!(client.fetch_set().contains(NodeId(2)));

    let mut saw_ref = false;
    while let Ok(event) = events.try_recv() {
        if event == ClientEvent::Status("Ref: {1 -> 2} 0".into()) {
            saw_ref = true;
        }
    }
    assert!(saw_ref);
}

#[tokio::test]
async fn sweep_expires_unanswered_requests() {
    let config = ClientConfig {
        transaction_timeout_secs: 0,
        sweep_interval_ms: 10,
        ..ClientConfig::default()
    };
    let (handle, task, _, _, mut events) = spawn(config);

    handle.start_login("tester", "secret").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.shutdown();

    let client = task.await.unwrap();
    assert!(client.registry().is_empty());

    let mut timed_out = false;
    while let Ok(event) = events.try_recv() {
        if event == ClientEvent::Status("Request timed out: client_register #1".into()) {
            timed_out = true;
        }
    }
    assert!(timed_out);
}

#[tokio::test]
async fn stopped_service_rejects_input() {
    let (handle, task, _, _, _) = spawn(ClientConfig::default());
    handle.shutdown();
    task.await.unwrap();

    let err = handle.set_player(1).await.unwrap_err();
    assert!(matches!(err, ClientError::ServiceStopped));
}

#[tokio::test]
async fn rejected_command_keeps_the_service_running() {
    let (handle, task, transport, _, mut events) = spawn(ClientConfig::default());

    // Not logged in yet: reported, not fatal.
    handle.set_player(3).await.unwrap();
    handle.start_login("tester", "secret").await.unwrap();
    handle.shutdown();

    let client = task.await.unwrap();
    assert_eq!(client.state(), LoginState::Registering);
    assert!(transport.last_of(RequestKind::AcctSetPlayer).is_none());

    let first = events.try_recv().unwrap();
    assert_eq!(
        first,
        ClientEvent::Status("Cannot select a player before logging in".into())
    );
}
