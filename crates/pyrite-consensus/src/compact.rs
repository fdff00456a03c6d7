// Consensus-critical. Changes require a coordinated network upgrade.
//! Compact difficulty target codec.
//!
//! `bits` encodes a 256-bit target as a base-256 floating-point number
//! packed into 32 bits: `target = mantissa * 256^(exponent - 3)`, with
//! bit 23 acting as a sign flag. Both conversions are total: every 32-bit
//! input decodes to a defined integer, and every integer encodes to a
//! defined (possibly truncated) compact form.
//!
//! The encoding is lossy: only the 23 most significant mantissa bits
//! survive. `bits_to_target(target_to_bits(&n)) == n` holds only for
//! values with at most 23 significant bits at their natural byte
//! alignment.

use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use pyrite_core::{CompactBits, COMPACT_SIGN_BIT};

/// Decode compact `bits` into a full signed target.
///
/// A zero mantissa yields zero regardless of the exponent; the sign flag
/// negates the decoded magnitude. There are no error conditions.
pub fn bits_to_target(bits: CompactBits) -> BigInt {
    let mantissa = bits.mantissa();
    let exponent = bits.exponent();

    // The exponent counts the bytes of the full magnitude, with the
    // mantissa occupying the top three. Exponents at or below 3 place
    // the mantissa partially below the ones byte, so the low bytes drop.
    let magnitude = if exponent <= 3 {
        BigInt::from(mantissa >> (8 * (3 - exponent)))
    } else {
        BigInt::from(mantissa) << (8 * (exponent - 3)) as usize
    };

    if bits.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Encode a signed target into its canonical compact form.
///
/// The caller's value is not mutated. Magnitudes wider than 23 bits are
/// truncated to their top three bytes; when the top mantissa bit would
/// collide with the sign flag, the mantissa is shifted down one byte and
/// the exponent incremented. Magnitudes wider than 255 bytes are outside
/// the representable range and must not be passed in.
pub fn target_to_bits(target: &BigInt) -> CompactBits {
    if target.is_zero() {
        return CompactBits::ZERO;
    }

    // Big-endian magnitude bytes without leading zeros; the byte count is
    // the exponent and the leading three bytes are the mantissa.
    let bytes = target.magnitude().to_bytes_be();
    let mut exponent = bytes.len() as u32;
    let mut mantissa = match *bytes.as_slice() {
        [] => 0,
        [a] => u32::from(a) << 16,
        [a, b] => u32::from(a) << 16 | u32::from(b) << 8,
        [a, b, c, ..] => u32::from(a) << 16 | u32::from(b) << 8 | u32::from(c),
    };

    // Renormalize when the mantissa would collide with the sign flag.
    if mantissa & COMPACT_SIGN_BIT != 0 {
        mantissa >>= 8;
        exponent += 1;
    }
    debug_assert!(exponent <= 0xff, "magnitude exceeds the exponent field");

    let mut compact = exponent << 24 | mantissa;
    if target.sign() == Sign::Minus {
        compact |= COMPACT_SIGN_BIT;
    }
    CompactBits::new(compact)
}
