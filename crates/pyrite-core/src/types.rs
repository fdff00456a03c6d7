// Consensus-critical. Changes require a coordinated network upgrade.
//! Canonical protocol types for Pyrite v0.
//!
//! This module defines the consensus-visible data structures shared by the
//! difficulty code and its callers. All types here must remain
//! backward-compatible once released.

use crate::constants::*;
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors related to parsing or construction of core protocol types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Hex string had an unexpected byte length.
    #[error("invalid hex length: expected {expected} bytes, got {got} bytes")]
    InvalidHexLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes provided.
        got: usize,
    },

    /// Hex decoding failed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Compact difficulty target encoding (`bits`).
///
/// A base-256 floating-point representation of a 256-bit magnitude packed
/// into 32 bits: bits 24-31 hold the exponent (the byte length of the
/// magnitude), bit 23 is a sign flag, and bits 0-22 hold the mantissa
/// (the most significant bytes of the magnitude).
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompactBits(pub u32);

impl CompactBits {
    /// The encoding of a zero target.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw 32-bit compact encoding.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw 32-bit encoding.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Byte length of the encoded magnitude.
    pub const fn exponent(self) -> u32 {
        self.0 >> 24
    }

    /// The 23-bit mantissa (most significant bytes of the magnitude).
    pub const fn mantissa(self) -> u32 {
        self.0 & COMPACT_MANTISSA_MASK
    }

    /// Whether the sign flag (bit 23) is set.
    pub const fn is_negative(self) -> bool {
        self.0 & COMPACT_SIGN_BIT != 0
    }
}

impl fmt::Debug for CompactBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactBits(0x{:08x})", self.0)
    }
}

impl fmt::Display for CompactBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for CompactBits {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<CompactBits> for u32 {
    fn from(bits: CompactBits) -> Self {
        bits.0
    }
}

impl FromStr for CompactBits {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != 4 {
            return Err(CoreError::InvalidHexLength {
                expected: 4,
                got: bytes.len(),
            });
        }
        Ok(Self(u32::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ])))
    }
}

/// Block header fields consumed by the difficulty code.
///
/// The chain-state layer owning full headers projects them down to this
/// triple; nothing here is hashed or validated for authenticity.
#[derive(Clone, Copy, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockHeader {
    /// Height of this block in the chain.
    pub height: u32,
    /// Compact difficulty target this block satisfied.
    pub bits: CompactBits,
    /// Block timestamp (Unix seconds), producer-supplied and not
    /// necessarily monotonic.
    pub timestamp: u64,
}
