//! Brute-force guess estimate from length, alphabet size and penalties.

use crate::math;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessEstimate {
    pub entropy_bits: f64,
    pub guesses: f64,
}

impl GuessEstimate {
    pub const ZERO: Self = Self {
        entropy_bits: 0.0,
        guesses: 0.0,
    };
}

/// `length * log2(charset)` minus the (non-negative) penalty, floored at
/// zero; guesses are `2^bits`. Degenerate input yields [`GuessEstimate::ZERO`].
pub fn estimate_guesses(length: usize, charset_size: u32, penalty_bits: f64) -> GuessEstimate {
    if length == 0 || charset_size == 0 {
        return GuessEstimate::ZERO;
    }

    let raw_bits = length as f64 * math::log2(f64::from(charset_size));
    let entropy_bits = (raw_bits - penalty_bits.max(0.0)).max(0.0);

    GuessEstimate {
        entropy_bits,
        guesses: math::pow(2.0, entropy_bits),
    }
}
