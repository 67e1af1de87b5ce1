//! Core types for the election ledger
//!
//! All types are designed for:
//! - Deterministic serialization (bincode)
//! - Closed candidate sets (no string or integer candidate ids)
//! - Checked seat arithmetic

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Caller identity supplied by the transaction applier (wallet address, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two candidates on the ballot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Candidate {
    /// First candidate
    CandidateA,
    /// Second candidate
    CandidateB,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::CandidateA => write!(f, "CandidateA"),
            Candidate::CandidateB => write!(f, "CandidateB"),
        }
    }
}

/// Candidate currently ahead on cumulative seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Leader {
    /// Nobody leads (tallies equal)
    #[default]
    None = 0,
    /// First candidate leads
    CandidateA = 1,
    /// Second candidate leads
    CandidateB = 2,
}

impl Leader {
    /// Numeric code as exposed to ledger clients
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Parse from numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Leader::None),
            1 => Some(Leader::CandidateA),
            2 => Some(Leader::CandidateB),
            _ => None,
        }
    }
}

impl From<Candidate> for Leader {
    fn from(candidate: Candidate) -> Self {
        match candidate {
            Candidate::CandidateA => Leader::CandidateA,
            Candidate::CandidateB => Leader::CandidateB,
        }
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leader::None => write!(f, "None"),
            Leader::CandidateA => write!(f, "CandidateA"),
            Leader::CandidateB => write!(f, "CandidateB"),
        }
    }
}

/// Aggregated result for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionResult {
    /// Region name (unique key)
    pub name: String,

    /// Votes cast for the first candidate
    pub votes_candidate_a: u64,

    /// Votes cast for the second candidate
    pub votes_candidate_b: u64,

    /// Seats the region awards to its winner
    pub seats: u32,
}

impl RegionResult {
    /// Create new region result
    pub fn new(
        name: impl Into<String>,
        votes_candidate_a: u64,
        votes_candidate_b: u64,
        seats: u32,
    ) -> Self {
        Self {
            name: name.into(),
            votes_candidate_a,
            votes_candidate_b,
            seats,
        }
    }

    /// Regional winner, `None` on a tie
    pub fn winner(&self) -> Option<Candidate> {
        match self.votes_candidate_a.cmp(&self.votes_candidate_b) {
            Ordering::Greater => Some(Candidate::CandidateA),
            Ordering::Less => Some(Candidate::CandidateB),
            Ordering::Equal => None,
        }
    }
}

/// Running seat tally per candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    /// Cumulative seats won by the first candidate
    pub seats_candidate_a: u32,

    /// Cumulative seats won by the second candidate
    pub seats_candidate_b: u32,
}

impl Tally {
    /// Seats held by a candidate
    pub fn seats(&self, candidate: Candidate) -> u32 {
        match candidate {
            Candidate::CandidateA => self.seats_candidate_a,
            Candidate::CandidateB => self.seats_candidate_b,
        }
    }

    /// Tally with `seats` added to `candidate`, or `None` on overflow
    pub fn add(&self, candidate: Candidate, seats: u32) -> Option<Self> {
        let mut next = *self;
        match candidate {
            Candidate::CandidateA => {
                next.seats_candidate_a = self.seats_candidate_a.checked_add(seats)?;
            }
            Candidate::CandidateB => {
                next.seats_candidate_b = self.seats_candidate_b.checked_add(seats)?;
            }
        }
        Some(next)
    }

    /// Leader by strict comparison of cumulative seats
    pub fn leader(&self) -> Leader {
        match self.seats_candidate_a.cmp(&self.seats_candidate_b) {
            Ordering::Greater => Leader::CandidateA,
            Ordering::Less => Leader::CandidateB,
            Ordering::Equal => Leader::None,
        }
    }
}
