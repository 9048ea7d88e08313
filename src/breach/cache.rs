//! Parsed range responses, kept for the lifetime of the checker.

use super::hasher::{is_hex_of_len, SUFFIX_LEN};
use std::collections::HashMap;

/// Upper-case 35-character suffix to breach count.
pub type SuffixCounts = HashMap<String, u64>;

/// Parses a `SUFFIX:COUNT` per line range body.
///
/// Tolerates `\r\n`, surrounding whitespace and blank lines. Lines without a
/// valid 35-hex suffix or a decimal count are skipped. Zero-count padding
/// rows are kept; they simply never match a real hash.
pub fn parse_range_response(body: &str) -> SuffixCounts {
    let mut counts = SuffixCounts::new();
    let mut skipped = 0usize;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((suffix, count)) = line.split_once(':') else {
            skipped += 1;
            continue;
        };
        let suffix = suffix.trim();
        let Ok(count) = count.trim().parse::<u64>() else {
            skipped += 1;
            continue;
        };
        if !is_hex_of_len(suffix, SUFFIX_LEN) {
            skipped += 1;
            continue;
        }
        counts.insert(suffix.to_ascii_uppercase(), count);
    }

    #[cfg(feature = "tracing")]
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped malformed range lines");
    }
    #[cfg(not(feature = "tracing"))]
    let _ = skipped;

    counts
}

#[cfg(feature = "async")]
pub use slots::RangeCache;

#[cfg(feature = "async")]
mod slots {
    use super::SuffixCounts;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, PoisonError};
    use tokio::sync::OnceCell;

    pub(crate) type Slot = Arc<OnceCell<Arc<SuffixCounts>>>;

    /// Prefix to parsed range, filled at most once per prefix.
    ///
    /// Entries are never evicted. A slot whose fetch failed or was dropped
    /// stays empty and is filled by the next caller.
    #[derive(Debug, Default)]
    pub struct RangeCache {
        slots: Mutex<HashMap<String, Slot>>,
    }

    impl RangeCache {
        pub fn new() -> Self {
            Self::default()
        }

        /// Slot shared by every caller asking for `prefix`.
        pub(crate) fn slot(&self, prefix: &str) -> Slot {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(prefix.to_string()).or_default())
        }

        pub fn get(&self, prefix: &str) -> Option<Arc<SuffixCounts>> {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(prefix).and_then(|slot| slot.get().cloned())
        }

        /// Number of prefixes with a stored response.
        pub fn len(&self) -> usize {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.values().filter(|slot| slot.initialized()).count()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX_A: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";
    const SUFFIX_B: &str = "011053FD0102E94D6AE2F8B83D76FAF94F6";

    #[test]
    fn test_parse_basic_and_crlf() {
        let body = format!("{SUFFIX_A}:37\r\n{SUFFIX_B}:2\r\n");
        let counts = parse_range_response(&body);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(SUFFIX_A), Some(&37));
        assert_eq!(counts.get(SUFFIX_B), Some(&2));
    }

    #[test]
    fn test_parse_uppercases_and_trims() {
        let body = format!("  {}:5  \n\n", SUFFIX_A.to_ascii_lowercase());
        let counts = parse_range_response(&body);
        assert_eq!(counts.get(SUFFIX_A), Some(&5));
    }

    #[test]
    fn test_parse_skips_malformed() {
        let body = format!(
            "garbage\n{SUFFIX_A}:notanumber\nABC:4\n{SUFFIX_B}:-1\n{SUFFIX_A}:9\nZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ:1"
        );
        let counts = parse_range_response(&body);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(SUFFIX_A), Some(&9));
    }

    #[test]
    fn test_parse_keeps_padding_rows() {
        let body = format!("{SUFFIX_A}:0");
        assert_eq!(parse_range_response(&body).get(SUFFIX_A), Some(&0));
        assert!(parse_range_response("").is_empty());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_cache_slot_shared_per_prefix() {
        use std::sync::Arc;

        let cache = RangeCache::new();
        assert!(cache.is_empty());

        let first = cache.slot("ABCDE");
        let second = cache.slot("ABCDE");
        assert!(Arc::ptr_eq(&first, &second));

        first
            .get_or_init(|| async { Arc::new(parse_range_response(&format!("{SUFFIX_A}:3"))) })
            .await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("ABCDE").and_then(|c| c.get(SUFFIX_A).copied()), Some(3));
        assert!(cache.get("00000").is_none());
    }
}
