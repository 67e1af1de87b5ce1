//! Notifications emitted by accepted operations
//!
//! Every successful write produces exactly one notification. Subscribers
//! (indexers, dashboards) observe them in ledger order via `sequence`.

use crate::types::{Candidate, Leader};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification emitted after an accepted write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Position in the ledger's operation order (starts at 1)
    pub sequence: u64,

    /// Unique notification ID (UUIDv7 for time-ordering)
    pub event_id: Uuid,

    /// Emission time
    pub emitted_at: DateTime<Utc>,

    /// What happened
    pub kind: NotificationKind,
}

/// Notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    /// A region result was accepted
    ResultAccepted {
        /// Region name
        region: String,
        /// Regional winner
        winner: Candidate,
        /// Leader after the tally update
        leader: Leader,
    },

    /// The election was ended
    ElectionClosed {
        /// Leader frozen at close
        leader: Leader,
    },
}

impl Notification {
    /// Create notification with a fresh ID and timestamp
    pub fn new(sequence: u64, kind: NotificationKind) -> Self {
        Self {
            sequence,
            event_id: Uuid::now_v7(),
            emitted_at: Utc::now(),
            kind,
        }
    }

    /// Serialize for indexers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
