// Consensus-critical. Changes require a coordinated network upgrade.
//! Epoch-based difficulty retargeting.
//!
//! Every `retarget_interval` blocks the target is rescaled by the ratio of
//! the measured epoch duration to the expected one, clamped to a 4x move
//! and floored at the network pow limit. Between boundaries the previous
//! target is carried forward unchanged.

use crate::compact::bits_to_target;
use crate::error::ConsensusError;
use crate::params::NetworkParams;
use num_bigint::BigInt;
use pyrite_core::BlockHeader;

/// A validated pair of epoch-boundary headers.
///
/// Construction proves that `start` is the first and `end` the last block
/// of one retarget epoch, so the retarget computation itself cannot be
/// handed headers from non-adjacent epochs.
#[derive(Clone, Copy, Debug)]
pub struct EpochPair {
    start: BlockHeader,
    end: BlockHeader,
}

impl EpochPair {
    /// Validates that `start` and `end` delimit one retarget epoch.
    pub fn new(
        start: BlockHeader,
        end: BlockHeader,
        params: &NetworkParams,
    ) -> Result<Self, ConsensusError> {
        if !params.is_retarget_height(end.height) {
            return Err(ConsensusError::InvalidEpochBoundary(
                "end header is not the last block of an epoch",
            ));
        }
        let span = u64::from(params.retarget_interval) - 1;
        if u64::from(start.height) + span != u64::from(end.height) {
            return Err(ConsensusError::InvalidEpochBoundary(
                "start header is not the first block of the epoch",
            ));
        }
        Ok(Self { start, end })
    }

    /// First header of the epoch.
    pub fn start(&self) -> &BlockHeader {
        &self.start
    }

    /// Last header of the epoch.
    pub fn end(&self) -> &BlockHeader {
        &self.end
    }

    /// Producer-reported duration of the epoch in seconds.
    ///
    /// Timestamps are not validated, so the result may be negative or
    /// wildly out of range; callers clamp before using it.
    pub fn actual_timespan_secs(&self) -> i64 {
        self.end.timestamp as i64 - self.start.timestamp as i64
    }
}

/// Computes the required target for the block following a given header.
#[derive(Clone, Debug)]
pub struct DifficultyAdjuster {
    params: NetworkParams,
}

impl DifficultyAdjuster {
    /// Builds an adjuster for the given network parameters.
    pub fn new(params: NetworkParams) -> Self {
        Self { params }
    }

    /// Builds an adjuster for the reference network.
    pub fn mainnet() -> Self {
        Self::new(NetworkParams::mainnet())
    }

    /// The network parameters in use.
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Target required of the block following `epoch_end`.
    ///
    /// Off a retarget boundary (2015 of every 2016 blocks on mainnet)
    /// this is `epoch_end`'s own target, decoded and passed through
    /// unchanged; `epoch_start` is not consulted. On a boundary the two
    /// headers must delimit one epoch, otherwise
    /// [`ConsensusError::InvalidEpochBoundary`] is returned.
    pub fn next_target(
        &self,
        epoch_start: &BlockHeader,
        epoch_end: &BlockHeader,
    ) -> Result<BigInt, ConsensusError> {
        if !self.params.is_retarget_height(epoch_end.height) {
            return Ok(bits_to_target(epoch_end.bits));
        }
        let pair = EpochPair::new(*epoch_start, *epoch_end, &self.params)?;
        Ok(self.retarget(&pair))
    }

    /// Retarget computation over a validated epoch pair.
    ///
    /// Multiplies before dividing in exact integer arithmetic, with
    /// truncating division, so the result is deterministic across
    /// platforms. The result never exceeds the network pow limit.
    pub fn retarget(&self, pair: &EpochPair) -> BigInt {
        let actual_secs = self.params.clamp_timespan_secs(pair.actual_timespan_secs());
        let last_target = bits_to_target(pair.end().bits);

        let mut next = last_target * BigInt::from(actual_secs)
            / BigInt::from(self.params.target_timespan_secs);
        if next > self.params.pow_limit {
            next = self.params.pow_limit.clone();
        }
        next
    }
}
