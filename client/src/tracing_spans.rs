//! Span constructors for client activity, so traces can be filtered by
//! reply type or transaction.

use tracing::{debug_span, info_span, Span};
use vaultlink_types::TransId;

/// Span covering the handling of one reply.
pub fn reply_span(reply: &str, trans_id: TransId) -> Span {
    debug_span!("reply", reply = %reply, trans = %trans_id)
}

/// Span covering the handling of one server push.
pub fn push_span(kind: &str) -> Span {
    debug_span!("push", kind = %kind)
}

/// Span covering one caller command.
pub fn command_span(command: &str) -> Span {
    info_span!("command", command = %command)
}
