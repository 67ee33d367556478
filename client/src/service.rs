//! Dispatch service: one task owns the client and applies inputs in order.
//!
//! Commands from callers, replies from the transport, and server pushes all
//! go through a single bounded queue, so handlers never run concurrently.
//! A periodic sweep expires transactions that never got a reply.

use std::time::Instant;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use vaultlink_protocol::{AuthReply, AuthTransport, VaultPush};
use vaultlink_store::VaultGraph;
use vaultlink_types::{Guid, NodeId, VaultNode};

use crate::tracing_spans::command_span;
use crate::{AuthClient, ClientConfig, ClientError};

/// A caller request, applied by the service task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    StartLogin { username: String, password: String },
    SetPlayer(u32),
    DownloadNext,
    FetchNode(NodeId),
    FetchNodeRefs(NodeId),
    CreateNodeAndLink { parent: NodeId, node: VaultNode },
    FindNodes(VaultNode),
    AddRef { parent: NodeId, child: NodeId, owner: u32 },
    SaveNode(VaultNode),
    RemoveRef { parent: NodeId, child: NodeId },
    RequestPublicAges(String),
    RequestAge { name: String, instance_id: Guid },
    InvalidateFetchSet,
}

impl ClientCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartLogin { .. } => "start_login",
            Self::SetPlayer(_) => "set_player",
            Self::DownloadNext => "download_next",
            Self::FetchNode(_) => "fetch_node",
            Self::FetchNodeRefs(_) => "fetch_node_refs",
            Self::CreateNodeAndLink { .. } => "create_node_and_link",
            Self::FindNodes(_) => "find_nodes",
            Self::AddRef { .. } => "add_ref",
            Self::SaveNode(_) => "save_node",
            Self::RemoveRef { .. } => "remove_ref",
            Self::RequestPublicAges(_) => "request_public_ages",
            Self::RequestAge { .. } => "request_age",
            Self::InvalidateFetchSet => "invalidate_fetch_set",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientInput {
    Command(ClientCommand),
    Reply(AuthReply),
    Push(VaultPush),
}

pub struct ClientService;

impl ClientService {
    /// Move `client` into a new task. The task hands the client back through
    /// the join handle once it stops, either on [`ClientHandle::shutdown`] or
    /// when every handle has been dropped.
    pub fn spawn<T, G>(
        mut client: AuthClient<T, G>,
        config: &ClientConfig,
    ) -> (ClientHandle, JoinHandle<AuthClient<T, G>>)
    where
        T: AuthTransport + 'static,
        G: VaultGraph + 'static,
    {
        let (input_tx, mut input_rx) = mpsc::channel(config.command_queue_size.max(1));
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let sweep_interval = config.sweep_interval();

        let task = tokio::spawn(async move {
            let mut sweep = tokio::time::interval(sweep_interval);
            sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    input = input_rx.recv() => match input {
                        Some(input) => apply(&mut client, input),
                        None => {
                            debug!("all client handles dropped");
                            break;
                        }
                    },
                    _ = shutdown_rx.recv() => {
                        info!("client service shutting down");
                        break;
                    }
                    _ = sweep.tick() => {
                        let expired = client.expire_transactions(Instant::now());
                        if expired > 0 {
                            debug!(expired, "expired transactions");
                        }
                    }
                }
            }
            client
        });

        let handle = ClientHandle {
            input_tx,
            shutdown_tx,
        };
        (handle, task)
    }
}

fn apply<T: AuthTransport, G: VaultGraph>(client: &mut AuthClient<T, G>, input: ClientInput) {
    match input {
        ClientInput::Reply(reply) => client.handle_reply(reply),
        ClientInput::Push(push) => client.handle_push(push),
        ClientInput::Command(command) => {
            let span = command_span(command.name());
            let _enter = span.enter();
            // Failures have already been reported as status events.
            let result = match command {
                ClientCommand::StartLogin { username, password } => {
                    client.start_login(&username, &password).map(drop)
                }
                ClientCommand::SetPlayer(player_id) => client.set_player(player_id).map(drop),
                ClientCommand::DownloadNext => client.download_next().map(drop),
                ClientCommand::FetchNode(node_id) => client.request_node_fetch(node_id).map(drop),
                ClientCommand::FetchNodeRefs(node_id) => client.fetch_node_refs(node_id).map(drop),
                ClientCommand::CreateNodeAndLink { parent, node } => {
                    client.create_node_and_link(parent, node).map(drop)
                }
                ClientCommand::FindNodes(template) => client.find_nodes(template).map(drop),
                ClientCommand::AddRef {
                    parent,
                    child,
                    owner,
                } => client.add_ref(parent, child, owner).map(drop),
                ClientCommand::SaveNode(node) => client.save_node(node).map(drop),
                ClientCommand::RemoveRef { parent, child } => {
                    client.remove_ref(parent, child).map(drop)
                }
                ClientCommand::RequestPublicAges(filename) => {
                    client.request_public_ages(&filename).map(drop)
                }
                ClientCommand::RequestAge { name, instance_id } => {
                    client.request_age(&name, instance_id).map(drop)
                }
                ClientCommand::InvalidateFetchSet => {
                    client.invalidate_fetch_set();
                    Ok(())
                }
            };
            if let Err(err) = result {
                debug!(error = %err, "command failed");
            }
        }
    }
}

/// Cloneable handle to a running [`ClientService`].
///
/// Every method only enqueues; outcomes arrive as
/// [`ClientEvent`](crate::ClientEvent)s.
#[derive(Clone)]
pub struct ClientHandle {
    input_tx: mpsc::Sender<ClientInput>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ClientHandle {
    pub async fn send(&self, input: ClientInput) -> Result<(), ClientError> {
        self.input_tx
            .send(input)
            .await
            .map_err(|_| ClientError::ServiceStopped)
    }

    async fn command(&self, command: ClientCommand) -> Result<(), ClientError> {
        self.send(ClientInput::Command(command)).await
    }

    pub async fn start_login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        self.command(ClientCommand::StartLogin {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn set_player(&self, player_id: u32) -> Result<(), ClientError> {
        self.command(ClientCommand::SetPlayer(player_id)).await
    }

    pub async fn download_next(&self) -> Result<(), ClientError> {
        self.command(ClientCommand::DownloadNext).await
    }

    pub async fn request_node_fetch(&self, node_id: NodeId) -> Result<(), ClientError> {
        self.command(ClientCommand::FetchNode(node_id)).await
    }

    pub async fn fetch_node_refs(&self, node_id: NodeId) -> Result<(), ClientError> {
        self.command(ClientCommand::FetchNodeRefs(node_id)).await
    }

    pub async fn create_node_and_link(&self, parent: NodeId, node: VaultNode) -> Result<(), ClientError> {
        self.command(ClientCommand::CreateNodeAndLink { parent, node }).await
    }

    pub async fn find_nodes(&self, template: VaultNode) -> Result<(), ClientError> {
        self.command(ClientCommand::FindNodes(template)).await
    }

    pub async fn add_ref(&self, parent: NodeId, child: NodeId, owner: u32) -> Result<(), ClientError> {
        self.command(ClientCommand::AddRef {
            parent,
            child,
            owner,
        })
        .await
    }

    pub async fn save_node(&self, node: VaultNode) -> Result<(), ClientError> {
        self.command(ClientCommand::SaveNode(node)).await
    }

    pub async fn remove_ref(&self, parent: NodeId, child: NodeId) -> Result<(), ClientError> {
        self.command(ClientCommand::RemoveRef { parent, child }).await
    }

    pub async fn request_public_ages(&self, filename: &str) -> Result<(), ClientError> {
        self.command(ClientCommand::RequestPublicAges(filename.to_string()))
            .await
    }

    pub async fn request_age(&self, name: &str, instance_id: Guid) -> Result<(), ClientError> {
        self.command(ClientCommand::RequestAge {
            name: name.to_string(),
            instance_id,
        })
        .await
    }

    pub async fn invalidate_fetch_set(&self) -> Result<(), ClientError> {
        self.command(ClientCommand::InvalidateFetchSet).await
    }

    pub async fn deliver_reply(&self, reply: AuthReply) -> Result<(), ClientError> {
        self.send(ClientInput::Reply(reply)).await
    }

    pub async fn deliver_push(&self, push: VaultPush) -> Result<(), ClientError> {
        self.send(ClientInput::Push(push)).await
    }

    /// Stop the service task once the inputs already queued are applied.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
