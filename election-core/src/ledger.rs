//! Main ledger orchestration layer
//!
//! This module ties together the state machine, the actor and the
//! notification fan-out into a high-level API for election clients.
//!
//! # Example
//!
//! ```no_run
//! use election_core::{AccountId, Config, Ledger, RegionResult};
//!
//! #[tokio::main]
//! async fn main() -> election_core::Result<()> {
//!     let owner = AccountId::new("0xowner");
//!     let ledger = Ledger::open(Config::with_owner(owner.clone())).await?;
//!
//!     ledger
//!         .submit_result(&owner, RegionResult::new("California", 1000, 900, 32))
//!         .await?;
//!     println!("leader: {}", ledger.current_leader().await?);
//!
//!     ledger.shutdown().await
//! }
//! ```

use crate::{
    actor::{spawn_election_actor, ElectionHandle},
    election::{Election, Operation},
    events::Notification,
    metrics::Metrics,
    snapshot::ElectionSnapshot,
    types::{AccountId, Candidate, Leader, RegionResult},
    Config, Result,
};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// Main election ledger interface
#[derive(Debug)]
pub struct Ledger {
    /// Actor handle
    handle: ElectionHandle,

    /// Notification fan-out (kept for new subscriptions)
    notifier: broadcast::Sender<Notification>,

    /// Metrics (if enabled)
    metrics: Option<Metrics>,

    /// Configuration
    config: Config,
}

impl Ledger {
    /// Open a ledger with the owner bound from configuration
    pub async fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let metrics = if config.metrics.enabled {
            Some(Metrics::new()?)
        } else {
            None
        };

        let (notifier, _) = broadcast::channel(config.notifications.buffer_size);

        let handle = spawn_election_actor(
            Election::new(config.owner.clone()),
            config.actor.mailbox_capacity,
            notifier.clone(),
            metrics.clone(),
        );

        tracing::info!(
            service = %config.service_name,
            owner = %config.owner,
            "Election ledger opened"
        );

        Ok(Self {
            handle,
            notifier,
            metrics,
            config,
        })
    }

    /// Submit a region result (owner only)
    pub async fn submit_result(
        &self,
        caller: &AccountId,
        region: RegionResult,
    ) -> Result<Notification> {
        self.handle
            .apply(Operation::SubmitResult {
                caller: caller.clone(),
                region,
            })
            .await
    }

    /// End the election (owner only)
    pub async fn end_election(&self, caller: &AccountId) -> Result<Notification> {
        self.handle
            .apply(Operation::EndElection {
                caller: caller.clone(),
            })
            .await
    }

    /// Apply a write operation
    pub async fn apply(&self, operation: Operation) -> Result<Notification> {
        self.handle.apply(operation).await
    }

    /// Candidate currently ahead
    pub async fn current_leader(&self) -> Result<Leader> {
        self.handle.current_leader().await
    }

    /// Whether the election has ended
    pub async fn election_ended(&self) -> Result<bool> {
        self.handle.election_ended().await
    }

    /// Accepted result for a region, `Error::NotFound` if none
    pub async fn region_result(&self, name: impl Into<String>) -> Result<RegionResult> {
        self.handle.region_result(name).await
    }

    /// Whether a region has an accepted result
    pub async fn results_submitted(&self, name: impl Into<String>) -> Result<bool> {
        self.handle.results_submitted(name).await
    }

    /// Cumulative seats for a candidate
    pub async fn seats(&self, candidate: Candidate) -> Result<u32> {
        self.handle.seats(candidate).await
    }

    /// Election owner
    pub async fn owner(&self) -> Result<AccountId> {
        self.handle.owner().await
    }

    /// Full state snapshot
    pub async fn snapshot(&self) -> Result<ElectionSnapshot> {
        self.handle.snapshot().await
    }

    /// Subscribe to notifications from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Notifications as a stream
    ///
    /// A subscriber that falls more than `notifications.buffer_size` behind
    /// receives a lag error item and resumes from the oldest retained entry.
    pub fn notifications(&self) -> BroadcastStream<Notification> {
        BroadcastStream::new(self.notifier.subscribe())
    }

    /// Metrics collector (if enabled)
    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shutdown ledger
    pub async fn shutdown(self) -> Result<()> {
        tracing::info!(service = %self.config.service_name, "Shutting down election ledger");
        self.handle.shutdown().await
    }
}
