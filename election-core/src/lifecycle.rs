//! Election lifecycle
//!
//! Two phases with a single one-way transition: `Open -> Closed`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Election phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting region results
    #[default]
    Open,
    /// Ended; no further writes
    Closed,
}

impl Phase {
    /// Check if transition is valid
    pub fn can_transition_to(&self, next: Phase) -> bool {
        matches!((self, next), (Phase::Open, Phase::Closed))
    }

    /// Check if phase is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Closed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Open => write!(f, "Open"),
            Phase::Closed => write!(f, "Closed"),
        }
    }
}

/// Lifecycle enforcement
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    current: Phase,
}

impl Lifecycle {
    /// Create lifecycle in the `Open` phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current phase
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Whether the election has ended
    pub fn is_closed(&self) -> bool {
        self.current.is_terminal()
    }

    /// Transition to next phase
    pub fn transition(&mut self, next: Phase) -> Result<()> {
        if self.current.is_terminal() {
            return Err(Error::InvalidTransition {
                from: self.current.to_string(),
                to: next.to_string(),
                reason: "current phase is terminal".to_string(),
            });
        }

        if !self.current.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: self.current.to_string(),
                to: next.to_string(),
                reason: "transition not allowed".to_string(),
            });
        }

        self.current = next;
        Ok(())
    }
}
