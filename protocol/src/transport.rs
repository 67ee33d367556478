//! The seam between the client core and whatever speaks the wire protocol.

use vaultlink_types::TransId;

use crate::{AuthRequest, ProtocolError};

/// Sends requests to the auth server.
///
/// `send` returns as soon as the request is queued; the reply arrives later,
/// on whatever task the implementation reads from, as an
/// [`AuthReply`](crate::AuthReply) tagged with the returned [`TransId`].
pub trait AuthTransport: Send {
    /// Open the connection. Synchronous: either the socket is up, or the
    /// attempt is over.
    fn connect(&mut self, host: &str, port: u16) -> Result<(), ProtocolError>;

    /// Queue a request and return the transaction id assigned to it.
    fn send(&mut self, request: AuthRequest) -> Result<TransId, ProtocolError>;
}

/// Source of the client challenge sent with the login request.
pub trait NonceSource: Send {
    fn next_nonce(&mut self) -> u32;
}

/// Nonces from the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRngNonce;

impl NonceSource for ThreadRngNonce {
    fn next_nonce(&mut self) -> u32 {
        rand::random::<u32>()
    }
}
