//! Consensus error types.

use thiserror::Error;

/// Errors returned by the difficulty retargeting code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsensusError {
    /// The supplied headers do not delimit a retarget epoch.
    #[error("invalid epoch boundary: {0}")]
    InvalidEpochBoundary(&'static str),
}
