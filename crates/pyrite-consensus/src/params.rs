// Consensus-critical. Changes require a coordinated network upgrade.
//! Network difficulty parameters.
//!
//! Parameters are constructed and passed in rather than read from
//! process-wide globals, so several networks (mainnet, testnets) can
//! coexist in one process.

use num_bigint::BigInt;
use num_traits::One;
use pyrite_core::{POW_LIMIT_EXPONENT, RETARGET_INTERVAL, TARGET_TIMESPAN_SECS};

/// Difficulty parameters of one network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Easiest permitted target; retarget results never exceed it.
    pub pow_limit: BigInt,
    /// Expected duration of one retarget epoch, in seconds.
    pub target_timespan_secs: u64,
    /// Number of blocks per retarget epoch. Must be non-zero.
    pub retarget_interval: u32,
}

impl NetworkParams {
    /// Parameters of the reference network: pow limit `2^224 - 1`,
    /// two-week epochs of 2016 blocks.
    pub fn mainnet() -> Self {
        Self {
            pow_limit: (BigInt::one() << POW_LIMIT_EXPONENT as usize) - BigInt::one(),
            target_timespan_secs: TARGET_TIMESPAN_SECS,
            retarget_interval: RETARGET_INTERVAL,
        }
    }

    /// True when `height` is the last block of a retarget epoch, i.e. the
    /// block that follows it starts a new epoch.
    pub fn is_retarget_height(&self, height: u32) -> bool {
        (u64::from(height) + 1) % u64::from(self.retarget_interval) == 0
    }

    /// Lower clamp bound on the measured epoch duration.
    pub fn min_actual_timespan_secs(&self) -> i64 {
        (self.target_timespan_secs / 4) as i64
    }

    /// Upper clamp bound on the measured epoch duration.
    pub fn max_actual_timespan_secs(&self) -> i64 {
        (self.target_timespan_secs * 4) as i64
    }

    /// Clamp a measured epoch duration into the permitted window,
    /// bounding any single retarget to a 4x change in either direction.
    /// Negative and otherwise absurd producer timestamps land on the
    /// clamp bounds rather than being rejected.
    pub fn clamp_timespan_secs(&self, actual_secs: i64) -> i64 {
        actual_secs.clamp(
            self.min_actual_timespan_secs(),
            self.max_actual_timespan_secs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::target_to_bits;
    use pyrite_core::CompactBits;

    #[test]
    fn mainnet_numbers() {
        let params = NetworkParams::mainnet();
        assert_eq!(params.target_timespan_secs, 1_209_600);
        assert_eq!(params.retarget_interval, 2016);
        assert_eq!(target_to_bits(&params.pow_limit), CompactBits::new(0x1d00_ffff));
    }

    #[test]
    fn retarget_heights() {
        let params = NetworkParams::mainnet();
        assert!(params.is_retarget_height(2015));
        assert!(params.is_retarget_height(497_951));
        assert!(!params.is_retarget_height(0));
        assert!(!params.is_retarget_height(2016));
        assert!(!params.is_retarget_height(497_950));
    }

    #[test]
    fn timespan_clamp_window() {
        let params = NetworkParams::mainnet();
        assert_eq!(params.min_actual_timespan_secs(), 302_400);
        assert_eq!(params.max_actual_timespan_secs(), 4_838_400);

        assert_eq!(params.clamp_timespan_secs(1_024_166), 1_024_166);
        assert_eq!(params.clamp_timespan_secs(0), 302_400);
        assert_eq!(params.clamp_timespan_secs(-100_000), 302_400);
        assert_eq!(params.clamp_timespan_secs(i64::MAX), 4_838_400);
    }
}
