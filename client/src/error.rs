use thiserror::Error;
use vaultlink_protocol::ProtocolError;
use vaultlink_types::TransId;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connect(ProtocolError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("download {0} is still in flight")]
    DownloadInFlight(TransId),

    #[error("config error: {0}")]
    Config(String),

    #[error("client service stopped")]
    ServiceStopped,
}
