//! Auth protocol boundary.
//!
//! Wire encoding and the encrypted handshake live below this crate; what it
//! defines is the contract the client core speaks: typed requests, typed
//! replies (each tagged with the transaction id the transport assigned), the
//! server-initiated vault pushes, and the [`AuthTransport`] trait.

pub mod error;
pub mod reply;
pub mod request;
pub mod transport;
pub mod version;

pub use error::ProtocolError;
pub use reply::{AuthReply, VaultPush};
pub use request::{AuthRequest, RequestKind};
pub use transport::{AuthTransport, NonceSource, ThreadRngNonce};
pub use version::ClientInfo;
