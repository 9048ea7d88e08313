//! k-anonymity breach lookup.
//!
//! Only the first five hex characters of the SHA-1 hash are ever sent; the
//! remaining 35 are matched locally against the returned range. The
//! password, the full hash and the suffix are never logged.

mod cache;
mod client;
mod hasher;

#[cfg(feature = "async")]
mod checker;
#[cfg(feature = "async")]
mod watcher;

pub use cache::{parse_range_response, SuffixCounts};
pub use client::{BreachConfig, RangeClient, DEFAULT_RANGE_URL, RANGE_URL_ENV};
pub use hasher::{is_valid_prefix, sha1_hex_upper, RangeKey, PREFIX_LEN, SUFFIX_LEN};

#[cfg(feature = "async")]
pub use cache::RangeCache;
#[cfg(feature = "async")]
pub use checker::BreachChecker;
#[cfg(feature = "http")]
pub use client::HttpRangeClient;
#[cfg(feature = "async")]
pub use watcher::{BreachStatus, BreachWatcher};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreachError {
    #[cfg(feature = "http")]
    #[error("Range request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Range endpoint responded with status {0}")]
    UnexpectedStatus(u16),
    #[error("Range transport failed: {0}")]
    Transport(String),
    #[error("Invalid hash prefix: {0}")]
    InvalidPrefix(String),
}
