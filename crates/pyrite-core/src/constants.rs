//! Protocol-wide constants for Pyrite v0.

/// Number of blocks in one difficulty retarget epoch.
pub const RETARGET_INTERVAL: u32 = 2016;

/// Expected block spacing in seconds (economic / UX target).
pub const TARGET_BLOCK_SPACING_SECS: u64 = 600;

/// Expected duration of one retarget epoch in seconds.
///
/// 2016 blocks at 10-minute spacing, i.e. two weeks.
pub const TARGET_TIMESPAN_SECS: u64 = RETARGET_INTERVAL as u64 * TARGET_BLOCK_SPACING_SECS;

/// Bit length of the mainnet proof-of-work limit.
///
/// The easiest permitted target is `2^224 - 1` (compact form `0x1d00ffff`).
pub const POW_LIMIT_EXPONENT: u32 = 224;

/// Sign flag inside a compact target encoding.
///
/// Bit 23 is ambiguous with the top mantissa bit; encoders must keep the
/// mantissa below this value and renormalize when it is reached.
pub const COMPACT_SIGN_BIT: u32 = 0x0080_0000;

/// Mask selecting the 23-bit mantissa of a compact target encoding.
pub const COMPACT_MANTISSA_MASK: u32 = 0x007f_ffff;
