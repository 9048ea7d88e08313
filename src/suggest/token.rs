//! Short random fragments used to patch up suggestions.
//!
//! Indices are drawn from the OS CSPRNG and reduced modulo the alphabet
//! length. That leaves a small bias whenever the length does not divide
//! 2^32, which is fine for illustrative suggestions and NOT for secrets.

use rand::rngs::OsRng;
use rand::RngCore;

const SYMBOLS: &[u8] = b"!@#$%^&*?_+-=";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const MAX_TOKEN: usize = 64;

/// Index in `0..len` from the OS random source; `0` when `len == 0`.
pub(crate) fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    OsRng.next_u32() as usize % len
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl RandomTokenGenerator {
    pub fn digits(&self, count: usize) -> String {
        token(count, DIGITS)
    }

    pub fn symbol(&self) -> String {
        token(1, SYMBOLS)
    }

    pub fn letters(&self, count: usize) -> String {
        token(count, LETTERS)
    }
}

fn token(count: usize, alphabet: &[u8]) -> String {
    (0..count.min(MAX_TOKEN))
        .map(|_| alphabet[random_index(alphabet.len())] as char)
        .collect()
}
