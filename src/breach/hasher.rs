//! SHA-1 range keys for the k-anonymity lookup.

use data_encoding::HEXUPPER;
use sha1::{Digest, Sha1};
use std::fmt;

pub const PREFIX_LEN: usize = 5;
pub const SUFFIX_LEN: usize = 35;

/// Upper-case hex SHA-1 of `input` (40 characters).
pub fn sha1_hex_upper(input: &str) -> String {
    HEXUPPER.encode(Sha1::digest(input.as_bytes()).as_slice())
}

/// A password hash split into the part that is sent and the part that is not.
#[derive(Clone, PartialEq, Eq)]
pub struct RangeKey {
    prefix: String,
    suffix: String,
}

impl RangeKey {
    pub fn of(password: &str) -> Self {
        let mut prefix = sha1_hex_upper(password);
        let suffix = prefix.split_off(PREFIX_LEN);
        Self { prefix, suffix }
    }

    /// The only part of the hash that leaves the process.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

// Keeps the suffix out of logs.
impl fmt::Debug for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeKey")
            .field("prefix", &self.prefix)
            .field("suffix", &"<redacted>")
            .finish()
    }
}

/// Exactly `len` upper- or lower-case hex digits.
pub(crate) fn is_hex_of_len(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn is_valid_prefix(prefix: &str) -> bool {
    is_hex_of_len(prefix, PREFIX_LEN) && !prefix.bytes().any(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_vector() {
        assert_eq!(
            sha1_hex_upper("password"),
            "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8"
        );
    }

    #[test]
    fn test_range_key_split() {
        let key = RangeKey::of("password");
        assert_eq!(key.prefix(), "5BAA6");
        assert_eq!(key.suffix(), "1E4C9B93F3F0682250B6CF8331B7EE68FD8");
        assert_eq!(key.suffix().len(), SUFFIX_LEN);
        assert!(is_valid_prefix(key.prefix()));
    }

    #[test]
    fn test_debug_redacts_suffix() {
        let rendered = format!("{:?}", RangeKey::of("password"));
        assert!(rendered.contains("5BAA6"));
        assert!(!rendered.contains("1E4C9B93"));
    }

    #[test]
    fn test_prefix_validation() {
        assert!(is_valid_prefix("ABCDE"));
        assert!(!is_valid_prefix("abcde"));
        assert!(!is_valid_prefix("ABCD"));
        assert!(!is_valid_prefix("ABCDG"));
    }
}
