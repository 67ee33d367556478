//! Prometheus metrics for the client core.
//!
//! [`ClientMetrics`] owns a dedicated [`Registry`] the embedding application
//! can encode into the Prometheus text exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

pub struct ClientMetrics {
    pub registry: Registry,

    /// Requests handed to the transport.
    pub requests_sent: IntCounter,
    /// Replies dispatched to a handler.
    pub replies_handled: IntCounter,
    /// Node fetches suppressed because the node was already seen.
    pub fetches_skipped: IntCounter,
    pub downloads_completed: IntCounter,
    pub transactions_expired: IntCounter,
    /// Transactions currently awaiting a reply.
    pub pending_transactions: IntGauge,
}

impl ClientMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_sent = register_int_counter_with_registry!(
            Opts::new("vaultlink_requests_sent_total", "Requests sent to the auth server"),
            registry
        )?;
        let replies_handled = register_int_counter_with_registry!(
            Opts::new("vaultlink_replies_handled_total", "Replies handled by the client"),
            registry
        )?;
        let fetches_skipped = register_int_counter_with_registry!(
            Opts::new(
                "vaultlink_fetches_skipped_total",
                "Vault node fetches skipped because the node was already seen"
            ),
            registry
        )?;
        let downloads_completed = register_int_counter_with_registry!(
            Opts::new("vaultlink_downloads_completed_total", "Files fully downloaded"),
            registry
        )?;
        let transactions_expired = register_int_counter_with_registry!(
            Opts::new(
                "vaultlink_transactions_expired_total",
                "Transactions dropped after waiting too long for a reply"
            ),
            registry
        )?;
        let pending_transactions = register_int_gauge_with_registry!(
            Opts::new(
                "vaultlink_pending_transactions",
                "Transactions currently awaiting a reply"
            ),
            registry
        )?;

        Ok(Self {
            registry,
            requests_sent,
            replies_handled,
            fetches_skipped,
            downloads_completed,
            transactions_expired,
            pending_transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_metrics_registered() {
        let metrics = ClientMetrics::new().expect("metrics");
        metrics.requests_sent.inc();
        metrics.pending_transactions.set(3);
        let families = metrics.registry.gather();
        assert_eq!(families.len(), 6);
    }

    #[test]
    fn separate_instances_do_not_collide() {
        let a = ClientMetrics::new().expect("first");
        let b = ClientMetrics::new().expect("second");
        a.downloads_completed.inc();
        assert_eq!(a.downloads_completed.get(), 1);
        assert_eq!(b.downloads_completed.get(), 0);
    }
}
