use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection to {host}:{port} failed: {reason}")]
    ConnectFailed {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("not connected")]
    NotConnected,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}
