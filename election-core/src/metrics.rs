//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the election ledger.
//!
//! # Metrics
//!
//! - `election_results_accepted_total` - Region results accepted
//! - `election_operations_rejected_total{kind}` - Rejected writes by error kind
//! - `election_closed_total` - Successful end-of-election operations
//! - `election_seats_candidate_a` / `election_seats_candidate_b` - Running tally

use crate::types::Tally;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::fmt;
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Accepted region results
    pub results_accepted: IntCounter,

    /// Rejected writes, labelled by error kind
    pub operations_rejected: IntCounterVec,

    /// Election close operations
    pub elections_closed: IntCounter,

    /// Cumulative seats for the first candidate
    pub seats_candidate_a: IntGauge,

    /// Cumulative seats for the second candidate
    pub seats_candidate_b: IntGauge,

    /// Prometheus registry
    registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector on a private registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let results_accepted = IntCounter::new(
            "election_results_accepted_total",
            "Total number of region results accepted",
        )?;
        registry.register(Box::new(results_accepted.clone()))?;

        let operations_rejected = IntCounterVec::new(
            Opts::new(
                "election_operations_rejected_total",
                "Total number of rejected write operations",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(operations_rejected.clone()))?;

        let elections_closed =
            IntCounter::new("election_closed_total", "Total number of elections closed")?;
        registry.register(Box::new(elections_closed.clone()))?;

        let seats_candidate_a = IntGauge::new(
            "election_seats_candidate_a",
            "Cumulative seats won by the first candidate",
        )?;
        registry.register(Box::new(seats_candidate_a.clone()))?;

        let seats_candidate_b = IntGauge::new(
            "election_seats_candidate_b",
            "Cumulative seats won by the second candidate",
        )?;
        registry.register(Box::new(seats_candidate_b.clone()))?;

        Ok(Self {
            results_accepted,
            operations_rejected,
            elections_closed,
            seats_candidate_a,
            seats_candidate_b,
            registry,
        })
    }

    /// Record an accepted region result and the tally after it
    pub fn record_result_accepted(&self, tally: Tally) {
        self.results_accepted.inc();
        self.seats_candidate_a.set(i64::from(tally.seats_candidate_a));
        self.seats_candidate_b.set(i64::from(tally.seats_candidate_b));
    }

    /// Record a rejected write
    pub fn record_rejection(&self, kind: &str) {
        self.operations_rejected.with_label_values(&[kind]).inc();
    }

    /// Record election close
    pub fn record_election_closed(&self) {
        self.elections_closed.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render in Prometheus text exposition format
    pub fn render(&self) -> crate::Result<String> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| crate::Error::Metrics(e.to_string()))
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("results_accepted", &self.results_accepted.get())
            .field("elections_closed", &self.elections_closed.get())
            .field("seats_candidate_a", &self.seats_candidate_a.get())
            .field("seats_candidate_b", &self.seats_candidate_b.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.results_accepted.get(), 0);
        assert_eq!(metrics.elections_closed.get(), 0);
    }

    #[test]
    fn test_record_result_accepted() {
        let metrics = Metrics::new().unwrap();
        let tally = Tally {
            seats_candidate_a: 32,
            seats_candidate_b: 33,
        };

        metrics.record_result_accepted(tally);
        assert_eq!(metrics.results_accepted.get(), 1);
        assert_eq!(metrics.seats_candidate_a.get(), 32);
        assert_eq!(metrics.seats_candidate_b.get(), 33);
    }

    #[test]
    fn test_record_rejection() {
        let metrics = Metrics::new().unwrap();
        metrics.record_rejection("tied_result");
        metrics.record_rejection("tied_result");
        metrics.record_rejection("unauthorized");

        assert_eq!(
            metrics
                .operations_rejected
                .with_label_values(&["tied_result"])
                .get(),
            2
        );

        let text = metrics.render().unwrap();
        assert!(text.contains("election_operations_rejected_total"));
    }

    #[test]
    fn test_debug_output() {
        let metrics = Metrics::new().unwrap();
        metrics.record_election_closed();

        let debug = format!("{:?}", metrics);
        assert!(debug.contains("elections_closed: 1"));
    }
}
