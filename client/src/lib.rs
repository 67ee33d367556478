//! vaultlink client core.
//!
//! Drives an asynchronous auth/vault protocol from the client side:
//! - Login handshake (connect, register, challenge login, player selection)
//! - Sequential chunked download of the SDL file list
//! - Deduplicated, incremental traversal of the remote vault graph
//! - Deferred follow-up requests tied to a pending transaction
//!
//! [`AuthClient`] is the state machine. It is driven one input at a time,
//! either directly through `&mut self` or through the [`ClientService`] task,
//! which serializes commands, replies, and pushes through a single queue.

pub mod ages;
pub mod client;
pub mod config;
pub mod deferred;
pub mod download;
pub mod error;
pub mod events;
pub mod fetch_set;
pub mod logging;
pub mod login;
pub mod metrics;
pub mod registry;
pub mod service;
pub mod session;
pub mod tracing_spans;
pub mod transfer;
pub mod vault_sync;

pub use client::AuthClient;
pub use config::ClientConfig;
pub use deferred::DeferredLinks;
pub use download::{ChunkProgress, DownloadBuffer, DownloadError, DownloadQueue};
pub use error::ClientError;
pub use events::{ClientEvent, EventBus};
pub use fetch_set::FetchSet;
pub use logging::{init_logging, LogFormat};
pub use metrics::ClientMetrics;
pub use registry::{PendingKind, PendingTransaction, TransactionRegistry};
pub use service::{ClientCommand, ClientHandle, ClientInput, ClientService};
pub use session::{Credentials, LoginState, Session};
