//! Election Ledger Core
//!
//! Deterministic state machine that tallies per-region results into a single
//! leader, guarded by an owner-only access policy and a one-way lifecycle.
//!
//! # Architecture
//!
//! - **State Machine**: `Election` checks every precondition before mutating
//! - **Single Writer**: One actor task applies operations in a total order
//! - **Notifications**: Accepted writes are broadcast to subscribers
//!
//! # Invariants
//!
//! - Idempotent rejection: a region name is accepted at most once
//! - Strict tie rejection: no accepted region has equal votes
//! - Monotonic lifecycle: `Open -> Closed`, never back
//! - Incremental leader: recomputed after every accepted submission

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod actor;
pub mod config;
pub mod election;
pub mod error;
pub mod events;
pub mod ledger;
pub mod lifecycle;
pub mod metrics;
pub mod snapshot;
pub mod types;

// Re-exports
pub use config::Config;
pub use election::{Election, Operation};
pub use error::{Error, Result};
pub use events::{Notification, NotificationKind};
pub use ledger::Ledger;
pub use lifecycle::Phase;
pub use snapshot::ElectionSnapshot;
pub use types::{AccountId, Candidate, Leader, RegionResult, Tally};
