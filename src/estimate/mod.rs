//! Guess-count estimators and the attacker-profile timing model.

mod crack_time;
mod guess;
mod rule_based;
mod wordlist;

pub use crack_time::{default_profiles, AttackProfile, CrackTimeEstimator, ScenarioView};
pub use guess::{estimate_guesses, GuessEstimate};
pub use rule_based::{RuleBasedAttackEstimator, WORDLIST_SIZE};
pub use wordlist::WordlistAttackEstimator;

/// Guess count a smarter-than-brute-force attacker needs.
///
/// `corpus_rank` is set when the attacker can tell roughly where the
/// password sits in a frequency-ordered corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackEstimate {
    pub guesses: f64,
    pub description: &'static str,
    pub corpus_rank: Option<f64>,
}

impl AttackEstimate {
    pub(crate) fn new(guesses: f64, description: &'static str) -> Self {
        Self {
            guesses,
            description,
            corpus_rank: None,
        }
    }

    pub(crate) fn with_rank(mut self, rank: f64) -> Self {
        self.corpus_rank = Some(rank);
        self
    }
}
