//! Actor-based transaction applier
//!
//! This module implements the single-writer pattern using Tokio actors:
//! - One task owns the `Election`; nothing else can reach its state
//! - Operations are applied one at a time, each to completion
//! - Accepted operations publish their notification to all subscribers
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │             ElectionHandle (Clone)                    │
//! │         Sends messages to actor mailbox              │
//! └─────────────────────┬────────────────────────────────┘
//!                       │
//!                       │ mpsc::channel (bounded)
//!                       ▼
//! ┌──────────────────────────────────────────────────────┐
//! │             ElectionActor (Single Task)               │
//! │        Election::apply() / read queries              │
//! └─────────────────────┬────────────────────────────────┘
//!                       │
//!                       │ broadcast::channel
//!                       ▼
//!              Subscribers (indexers)
//! ```

use crate::election::{Election, Operation};
use crate::events::Notification;
use crate::metrics::Metrics;
use crate::snapshot::ElectionSnapshot;
use crate::types::{AccountId, Candidate, Leader, RegionResult};
use crate::{Error, Result};
use std::fmt;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Message sent to the election actor
#[derive(Debug)]
pub enum ElectionMessage {
    /// Apply a write operation
    Apply {
        /// Write to apply
        operation: Operation,
        /// Reply channel
        response: oneshot::Sender<Result<Notification>>,
    },

    /// Get current leader
    CurrentLeader {
        /// Reply channel
        response: oneshot::Sender<Leader>,
    },

    /// Get election status
    ElectionEnded {
        /// Reply channel
        response: oneshot::Sender<bool>,
    },

    /// Get an accepted region result
    RegionResult {
        /// Region name
        name: String,
        /// Reply channel
        response: oneshot::Sender<Result<RegionResult>>,
    },

    /// Check whether a region was accepted
    ResultsSubmitted {
        /// Region name
        name: String,
        /// Reply channel
        response: oneshot::Sender<bool>,
    },

    /// Get cumulative seats for a candidate
    Seats {
        /// Candidate to read
        candidate: Candidate,
        /// Reply channel
        response: oneshot::Sender<u32>,
    },

    /// Get election owner
    Owner {
        /// Reply channel
        response: oneshot::Sender<AccountId>,
    },

    /// Get full state snapshot
    Snapshot {
        /// Reply channel
        response: oneshot::Sender<ElectionSnapshot>,
    },

    /// Shutdown actor
    Shutdown,
}

/// Actor that applies election operations
pub struct ElectionActor {
    /// State machine
    election: Election,

    /// Mailbox for incoming messages
    mailbox: mpsc::Receiver<ElectionMessage>,

    /// Notification fan-out
    notifier: broadcast::Sender<Notification>,

    /// Metrics (if enabled)
    metrics: Option<Metrics>,
}

impl ElectionActor {
    /// Create new actor
    pub fn new(
        election: Election,
        mailbox: mpsc::Receiver<ElectionMessage>,
        notifier: broadcast::Sender<Notification>,
        metrics: Option<Metrics>,
    ) -> Self {
        Self {
            election,
            mailbox,
            notifier,
            metrics,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        tracing::debug!(owner = %self.election.owner(), "Election actor started");

        while let Some(msg) = self.mailbox.recv().await {
            if let ElectionMessage::Shutdown = msg {
                break;
            }
            self.handle_message(msg);
        }

        tracing::debug!("Election actor stopped");
    }

    /// Handle a single message
    fn handle_message(&mut self, msg: ElectionMessage) {
        match msg {
            ElectionMessage::Apply {
                operation,
                response,
            } => {
                let result = self.apply(operation);
                let _ = response.send(result);
            }

            ElectionMessage::CurrentLeader { response } => {
                let _ = response.send(self.election.current_leader());
            }

            ElectionMessage::ElectionEnded { response } => {
                let _ = response.send(self.election.election_ended());
            }

            ElectionMessage::RegionResult { name, response } => {
                let result = self.election.region_result(&name).cloned();
                let _ = response.send(result);
            }

            ElectionMessage::ResultsSubmitted { name, response } => {
                let _ = response.send(self.election.results_submitted(&name));
            }

            ElectionMessage::Seats {
                candidate,
                response,
            } => {
                let _ = response.send(self.election.seats(candidate));
            }

            ElectionMessage::Owner { response } => {
                let _ = response.send(self.election.owner().clone());
            }

            ElectionMessage::Snapshot { response } => {
                let _ = response.send(self.election.snapshot());
            }

            ElectionMessage::Shutdown => {
                // Handled in main loop
            }
        }
    }

    /// Apply a write, then record and publish the outcome
    fn apply(&mut self, operation: Operation) -> Result<Notification> {
        let is_close = matches!(operation, Operation::EndElection { .. });
        let result = self.election.apply(operation);

        match &result {
            Ok(notification) => {
                if let Some(metrics) = &self.metrics {
                    if is_close {
                        metrics.record_election_closed();
                    } else {
                        metrics.record_result_accepted(self.election.tally());
                    }
                }

                // No subscribers is not an error
                let _ = self.notifier.send(notification.clone());
            }
            Err(e) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_rejection(e.kind());
                }
            }
        }

        result
    }
}

impl fmt::Debug for ElectionActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElectionActor")
            .field("election", &self.election)
            .field("subscribers", &self.notifier.receiver_count())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Handle for sending messages to the actor
#[derive(Clone, Debug)]
pub struct ElectionHandle {
    sender: mpsc::Sender<ElectionMessage>,
}

impl ElectionHandle {
    /// Create new handle
    pub fn new(sender: mpsc::Sender<ElectionMessage>) -> Self {
        Self { sender }
    }

    /// Send a request and await its reply
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ElectionMessage,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(build(tx))
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Apply a write operation
    pub async fn apply(&self, operation: Operation) -> Result<Notification> {
        self.request(|response| ElectionMessage::Apply {
            operation,
            response,
        })
        .await?
    }

    /// Get current leader
    pub async fn current_leader(&self) -> Result<Leader> {
        self.request(|response| ElectionMessage::CurrentLeader { response })
            .await
    }

    /// Get election status
    pub async fn election_ended(&self) -> Result<bool> {
        self.request(|response| ElectionMessage::ElectionEnded { response })
            .await
    }

    /// Get an accepted region result
    pub async fn region_result(&self, name: impl Into<String>) -> Result<RegionResult> {
        let name = name.into();
        self.request(|response| ElectionMessage::RegionResult { name, response })
            .await?
    }

    /// Check whether a region was accepted
    pub async fn results_submitted(&self, name: impl Into<String>) -> Result<bool> {
        let name = name.into();
        self.request(|response| ElectionMessage::ResultsSubmitted { name, response })
            .await
    }

    /// Get cumulative seats for a candidate
    pub async fn seats(&self, candidate: Candidate) -> Result<u32> {
        self.request(|response| ElectionMessage::Seats {
            candidate,
            response,
        })
        .await
    }

    /// Get election owner
    pub async fn owner(&self) -> Result<AccountId> {
        self.request(|response| ElectionMessage::Owner { response })
            .await
    }

    /// Get full state snapshot
    pub async fn snapshot(&self) -> Result<ElectionSnapshot> {
        self.request(|response| ElectionMessage::Snapshot { response })
            .await
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(ElectionMessage::Shutdown)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;
        Ok(())
    }
}

/// Spawn the election actor
pub fn spawn_election_actor(
    election: Election,
    mailbox_capacity: usize,
    notifier: broadcast::Sender<Notification>,
    metrics: Option<Metrics>,
) -> ElectionHandle {
    let (tx, rx) = mpsc::channel(mailbox_capacity); // Bounded channel for backpressure
    let actor = ElectionActor::new(election, rx, notifier, metrics);

    tokio::spawn(async move {
        actor.run().await;
    });

    ElectionHandle::new(tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> AccountId {
        AccountId::new("0xowner")
    }

    fn spawn_test_actor() -> (ElectionHandle, broadcast::Receiver<Notification>) {
        let (notifier, rx) = broadcast::channel(16);
        let handle = spawn_election_actor(Election::new(owner()), 100, notifier, None);
        (handle, rx)
    }

    #[tokio::test]
    async fn test_actor_spawn_and_shutdown() {
        let (handle, _rx) = spawn_test_actor();
        assert_eq!(handle.owner().await.unwrap(), owner());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_actor_apply_and_read() {
        let (handle, mut rx) = spawn_test_actor();

        let notification = handle
            .apply(Operation::SubmitResult {
                caller: owner(),
                region: RegionResult::new("California", 1000, 900, 32),
            })
            .await
            .unwrap();
        assert_eq!(notification.sequence, 1);

        // Published to subscribers
        let published = rx.recv().await.unwrap();
        assert_eq!(published, notification);

        assert_eq!(handle.current_leader().await.unwrap(), Leader::CandidateA);
        assert_eq!(handle.seats(Candidate::CandidateA).await.unwrap(), 32);
        assert!(handle.results_submitted("California").await.unwrap());

        let region = handle.region_result("California").await.unwrap();
        assert_eq!(region.seats, 32);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_actor_rejection_not_published() {
        let (handle, mut rx) = spawn_test_actor();

        let result = handle
            .apply(Operation::SubmitResult {
                caller: owner(),
                region: RegionResult::new("South Dakota", 100, 100, 100),
            })
            .await;
        assert!(matches!(result, Err(Error::TiedResult(_))));
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        handle.shutdown().await.unwrap();
    }

    #[test]
    fn test_actor_debug() {
        let (_tx, rx) = mpsc::channel(1);
        let (notifier, _sub) = broadcast::channel(1);
        let actor = ElectionActor::new(Election::new(owner()), rx, notifier, None);

        let debug = format!("{:?}", actor);
        assert!(debug.contains("0xowner"));
        assert!(debug.contains("subscribers: 1"));
        assert!(debug.contains("metrics: None"));
    }

    #[tokio::test]
    async fn test_handle_after_shutdown() {
        let (handle, _rx) = spawn_test_actor();
        handle.shutdown().await.unwrap();

        // Wait for the actor task to drop its mailbox
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let result = handle.election_ended().await;
        assert!(matches!(result, Err(Error::Concurrency(_))));
    }
}
