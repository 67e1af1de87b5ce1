//! Election state machine
//!
//! Applies one operation at a time. Every write checks all of its
//! preconditions before touching state, so a rejected operation leaves the
//! election exactly as it was.
//!
//! # Invariants
//!
//! - A region name is accepted at most once
//! - Accepted regions have `seats > 0` and no tied vote
//! - No submission is accepted once the election is closed
//! - The leader is the candidate with strictly more cumulative seats, `None` on equality
//!
//! # Example
//!
//! ```
//! use election_core::{AccountId, Election, Leader, RegionResult};
//!
//! let owner = AccountId::new("0xowner");
//! let mut election = Election::new(owner.clone());
//!
//! election
//!     .submit_result(&owner, RegionResult::new("California", 1000, 900, 32))
//!     .unwrap();
//! assert_eq!(election.current_leader(), Leader::CandidateA);
//! ```

use crate::{
    events::{Notification, NotificationKind},
    lifecycle::{Lifecycle, Phase},
    snapshot::ElectionSnapshot,
    types::{AccountId, Candidate, Leader, RegionResult, Tally},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Write operation as delivered by the transaction applier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Submit a region result
    SubmitResult {
        /// Invoking identity
        caller: AccountId,
        /// Result to record
        region: RegionResult,
    },

    /// End the election
    EndElection {
        /// Invoking identity
        caller: AccountId,
    },
}

impl Operation {
    /// Invoking identity
    pub fn caller(&self) -> &AccountId {
        match self {
            Operation::SubmitResult { caller, .. } | Operation::EndElection { caller } => caller,
        }
    }
}

/// Election ledger state
#[derive(Debug, Clone)]
pub struct Election {
    /// Owner bound at creation
    owner: AccountId,

    /// Open/Closed phase
    lifecycle: Lifecycle,

    /// Running seat tally
    tally: Tally,

    /// Last computed leader (frozen once closed)
    leader: Leader,

    /// Accepted results keyed by region name
    results: HashMap<String, RegionResult>,

    /// Region names in acceptance order
    submitted: Vec<String>,

    /// Sequence of the last emitted notification
    sequence: u64,
}

impl Election {
    /// Create an open election owned by `owner`
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            lifecycle: Lifecycle::new(),
            tally: Tally::default(),
            leader: Leader::None,
            results: HashMap::new(),
            submitted: Vec::new(),
            sequence: 0,
        }
    }

    /// Submit a region result
    ///
    /// Checks, in order: owner, open phase, seat count, tie, name, duplicate,
    /// tally overflow. The first failing check is returned.
    pub fn submit_result(
        &mut self,
        caller: &AccountId,
        region: RegionResult,
    ) -> Result<Notification> {
        let (winner, tally) = match self.check_submission(caller, &region) {
            Ok(staged) => staged,
            Err(e) => {
                tracing::warn!(
                    caller = %caller,
                    region = %region.name,
                    reason = e.kind(),
                    "Rejected region result"
                );
                return Err(e);
            }
        };

        // Commit
        self.tally = tally;
        self.leader = tally.leader();
        self.submitted.push(region.name.clone());

        tracing::info!(
            region = %region.name,
            winner = %winner,
            seats = region.seats,
            leader = %self.leader,
            "Accepted region result"
        );

        let kind = NotificationKind::ResultAccepted {
            region: region.name.clone(),
            winner,
            leader: self.leader,
        };
        self.results.insert(region.name.clone(), region);

        Ok(self.emit(kind))
    }

    /// End the election
    ///
    /// The leader is left as last computed.
    pub fn end_election(&mut self, caller: &AccountId) -> Result<Notification> {
        if let Err(e) = self.check_write(caller) {
            tracing::warn!(caller = %caller, reason = e.kind(), "Rejected end of election");
            return Err(e);
        }

        self.lifecycle.transition(Phase::Closed)?;

        tracing::info!(
            leader = %self.leader,
            regions = self.submitted.len(),
            "Election closed"
        );

        Ok(self.emit(NotificationKind::ElectionClosed {
            leader: self.leader,
        }))
    }

    /// Apply a write operation
    pub fn apply(&mut self, operation: Operation) -> Result<Notification> {
        match operation {
            Operation::SubmitResult { caller, region } => self.submit_result(&caller, region),
            Operation::EndElection { caller } => self.end_election(&caller),
        }
    }

    /// Rebuild an election from an ordered operation log
    ///
    /// Rejected operations are skipped, exactly as they were when first applied.
    pub fn replay(owner: AccountId, operations: impl IntoIterator<Item = Operation>) -> Self {
        let mut election = Self::new(owner);
        for operation in operations {
            let _ = election.apply(operation);
        }
        election
    }

    /// Candidate currently ahead
    pub fn current_leader(&self) -> Leader {
        self.leader
    }

    /// Whether the election has ended
    pub fn election_ended(&self) -> bool {
        self.lifecycle.is_closed()
    }

    /// Accepted result for a region
    pub fn region_result(&self, name: &str) -> Result<&RegionResult> {
        self.results
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Election owner
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.lifecycle.current()
    }

    /// Cumulative seats for a candidate
    pub fn seats(&self, candidate: Candidate) -> u32 {
        self.tally.seats(candidate)
    }

    /// Running tally
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Whether a region has an accepted result
    pub fn results_submitted(&self, name: &str) -> bool {
        self.results.contains_key(name)
    }

    /// Accepted region names in acceptance order
    pub fn submitted_regions(&self) -> &[String] {
        &self.submitted
    }

    /// Copy of the full state
    pub fn snapshot(&self) -> ElectionSnapshot {
        ElectionSnapshot {
            owner: self.owner.clone(),
            phase: self.lifecycle.current(),
            tally: self.tally,
            leader: self.leader,
            regions: self
                .submitted
                .iter()
                .filter_map(|name| self.results.get(name).cloned())
                .collect(),
            last_sequence: self.sequence,
        }
    }

    /// Owner and phase checks shared by both writes
    fn check_write(&self, caller: &AccountId) -> Result<()> {
        if caller != &self.owner {
            return Err(Error::Unauthorized(caller.to_string()));
        }

        if self.lifecycle.is_closed() {
            return Err(Error::ElectionClosed);
        }

        Ok(())
    }

    /// Run every submission precondition and stage the resulting tally
    fn check_submission(
        &self,
        caller: &AccountId,
        region: &RegionResult,
    ) -> Result<(Candidate, Tally)> {
        self.check_write(caller)?;

        if region.seats == 0 {
            return Err(Error::InvalidSeatCount(region.name.clone()));
        }

        let winner = region
            .winner()
            .ok_or_else(|| Error::TiedResult(region.name.clone()))?;

        if region.name.is_empty() {
            return Err(Error::InvalidRegionName);
        }

        if self.results.contains_key(&region.name) {
            return Err(Error::DuplicateRegion(region.name.clone()));
        }

        let tally = self
            .tally
            .add(winner, region.seats)
            .ok_or_else(|| Error::TallyOverflow {
                region: region.name.clone(),
                seats: region.seats,
            })?;

        Ok((winner, tally))
    }

    fn emit(&mut self, kind: NotificationKind) -> Notification {
        self.sequence += 1;
        Notification::new(self.sequence, kind)
    }
}
