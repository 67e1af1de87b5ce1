//! Point-in-time copy of the election state
//!
//! Snapshots compare by value, so "a rejected operation changes nothing" is
//! checked as `before == after`. The digest is a deterministic state root
//! over the canonical bincode encoding.

use crate::lifecycle::Phase;
use crate::types::{AccountId, Leader, RegionResult, Tally};
use crate::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Full election state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    /// Owner bound at creation
    pub owner: AccountId,

    /// Lifecycle phase
    pub phase: Phase,

    /// Running seat tally
    pub tally: Tally,

    /// Last computed leader
    pub leader: Leader,

    /// Accepted regions in acceptance order
    pub regions: Vec<RegionResult>,

    /// Sequence of the last emitted notification (0 if none)
    pub last_sequence: u64,
}

impl ElectionSnapshot {
    /// Canonical bytes
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// SHA-256 state root
    pub fn digest(&self) -> Result<[u8; 32]> {
        let bytes = self.canonical_bytes()?;
        Ok(Sha256::digest(&bytes).into())
    }
}
