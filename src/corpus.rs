//! Corpus configuration
//!
//! Dictionaries consulted by the evaluators. They are plain values handed to
//! the analyzer at construction so tests and deployments can swap them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a newline-delimited common-password file.
pub const COMMON_PASSWORDS_ENV: &str = "PWD_ANALYZER_COMMON_PASSWORDS";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Corpus file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read corpus file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Corpus file is empty")]
    EmptyFile,
}

const COMMON_PASSWORDS: [&str; 12] = [
    "password", "password1", "qwerty", "qwerty123", "123456", "123456789", "12345678", "111111",
    "letmein", "admin", "welcome", "iloveyou",
];

const KEYBOARD_WALKS: [&str; 5] = ["qwerty", "asdf", "zxcv", "12345", "password"];

const RULE_SUBSTRINGS: [&str; 15] = [
    "password", "qwerty", "123456", "admin", "welcome", "letmein", "monkey", "dragon", "master",
    "sunshine", "princess", "football", "baseball", "superman", "trustno1",
];

/// Frequency-ordered breach corpus head; rank is the 1-based index.
const TOP_WORDLIST: [&str; 66] = [
    "password", "123456", "123456789", "12345678", "12345", "1234567", "password1", "qwerty",
    "abc123", "111111", "123123", "admin", "letmein", "welcome", "monkey", "1234567890", "dragon",
    "sunshine", "princess", "football", "iloveyou", "master", "hello", "freedom", "whatever",
    "qazwsx", "trustno1", "654321", "jordan23", "harley", "password123", "shadow", "superman",
    "qwerty123", "michael", "mustang", "1234", "jennifer", "joshua", "hunter", "batman", "thomas",
    "hockey", "ranger", "daniel", "hannah", "maggie", "jessica", "charlie", "samantha", "summer",
    "winter", "spring", "autumn", "january", "february", "march", "april", "may", "june", "july",
    "august", "september", "october", "november", "december",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// Exact-match set, stored lower-cased.
    pub common_passwords: HashSet<String>,
    /// Substrings treated as keyboard walks.
    pub keyboard_walks: Vec<String>,
    /// Substrings that mark a password as wordlist-derived for rule attacks.
    pub rule_substrings: Vec<String>,
    /// Ordered breach list used for corpus ranks.
    pub top_wordlist: Vec<String>,
}

impl Default for Corpus {
    fn default() -> Self {
        Self {
            common_passwords: COMMON_PASSWORDS.iter().map(|s| s.to_string()).collect(),
            keyboard_walks: KEYBOARD_WALKS.iter().map(|s| s.to_string()).collect(),
            rule_substrings: RULE_SUBSTRINGS.iter().map(|s| s.to_string()).collect(),
            top_wordlist: TOP_WORDLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Corpus {
    pub fn is_common(&self, password: &str) -> bool {
        self.common_passwords.contains(&password.to_lowercase())
    }

    /// 1-based rank of `lower` in the top wordlist.
    pub fn wordlist_rank(&self, lower: &str) -> Option<usize> {
        self.top_wordlist.iter().position(|w| w == lower).map(|i| i + 1)
    }

    pub fn with_common_passwords<I, S>(mut self, passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.common_passwords = passwords
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    /// Replaces the common-password set with the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File holds no entries
    pub fn load_common_passwords<P: AsRef<Path>>(self, path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Corpus load FAILED: file not found {:?}", path);
            return Err(CorpusError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Corpus load FAILED: empty file {:?}", path);
            return Err(CorpusError::EmptyFile);
        }

        let corpus = self.with_common_passwords(content.lines());

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Common passwords loaded: {} entries from {:?}",
            corpus.common_passwords.len(),
            path
        );

        Ok(corpus)
    }

    /// Built-in corpus, with the common-password set replaced from the file
    /// named by `PWD_ANALYZER_COMMON_PASSWORDS` when that variable is set.
    pub fn from_env() -> Result<Self, CorpusError> {
        match common_passwords_path() {
            Some(path) => Self::default().load_common_passwords(path),
            None => Ok(Self::default()),
        }
    }
}

pub fn common_passwords_path() -> Option<PathBuf> {
    std::env::var(COMMON_PASSWORDS_ENV).ok().map(PathBuf::from)
}
