//! Error types for the election ledger

use thiserror::Error;

/// Result type for election operations
pub type Result<T> = std::result::Result<T, Error>;

/// Election ledger errors
///
/// The first group are precondition rejections raised by the state machine.
/// A rejected operation leaves the election state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller is not the election owner
    #[error("Unauthorized: not invoked by the owner ({0})")]
    Unauthorized(String),

    /// Write attempted after the election was closed
    #[error("Election closed: the election has ended already")]
    ElectionClosed,

    /// Region submitted with zero seats
    #[error("Invalid seat count: region {0} must have at least 1 seat")]
    InvalidSeatCount(String),

    /// Region submitted with equal votes for both candidates
    #[error("Tied result: region {0} cannot be a tie")]
    TiedResult(String),

    /// Region already accepted
    #[error("Duplicate region: result for {0} was already submitted")]
    DuplicateRegion(String),

    /// Region with an empty name
    #[error("Invalid region name: name must not be empty")]
    InvalidRegionName,

    /// Running seat tally would overflow
    #[error("Tally overflow: adding {seats} seats from {region}")]
    TallyOverflow {
        /// Region whose seats could not be added
        region: String,
        /// Seats carried by the region
        seats: u32,
    },

    /// Region has no accepted result
    #[error("Region not found: {0}")]
    NotFound(String),

    /// Lifecycle transition not allowed
    #[error("Invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// Current phase
        from: String,
        /// Requested phase
        to: String,
        /// Why the transition was refused
        reason: String,
    },

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Unauthorized(_) => "unauthorized",
            Error::ElectionClosed => "election_closed",
            Error::InvalidSeatCount(_) => "invalid_seat_count",
            Error::TiedResult(_) => "tied_result",
            Error::DuplicateRegion(_) => "duplicate_region",
            Error::InvalidRegionName => "invalid_region_name",
            Error::TallyOverflow { .. } => "tally_overflow",
            Error::NotFound(_) => "not_found",
            Error::InvalidTransition { .. } => "invalid_transition",
            Error::Concurrency(_) => "concurrency",
            Error::Config(_) => "config",
            Error::Serialization(_) => "serialization",
            Error::Metrics(_) => "metrics",
            Error::Io(_) => "io",
        }
    }

    /// Whether this error is a precondition rejection from the state machine
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized(_)
                | Error::ElectionClosed
                | Error::InvalidSeatCount(_)
                | Error::TiedResult(_)
                | Error::DuplicateRegion(_)
                | Error::InvalidRegionName
                | Error::TallyOverflow { .. }
                | Error::InvalidTransition { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Error::Metrics(err.to_string())
    }
}
