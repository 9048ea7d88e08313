//! Wordlist attack model: straight dictionary runs before any rules.

use super::rule_based::{is_digits_then_letters, is_letters_then_digits, RuleBasedAttackEstimator, WORDLIST_SIZE};
use super::AttackEstimate;
use crate::corpus::Corpus;

const EXTENDED_WORDLIST_RANK: f64 = 500_000.0;
const RULE_FALLBACK_CAP: f64 = WORDLIST_SIZE * 500.0;

#[derive(Debug, Clone)]
pub struct WordlistAttackEstimator {
    top_wordlist: Vec<String>,
    rule_based: RuleBasedAttackEstimator,
}

impl Default for WordlistAttackEstimator {
    fn default() -> Self {
        Self::new(&Corpus::default())
    }
}

impl WordlistAttackEstimator {
    pub fn new(corpus: &Corpus) -> Self {
        Self {
            top_wordlist: corpus.top_wordlist.clone(),
            rule_based: RuleBasedAttackEstimator::new(corpus),
        }
    }

    pub fn estimate(&self, password: &str) -> AttackEstimate {
        let trimmed = password.trim();
        if trimmed.is_empty() {
            return AttackEstimate::new(WORDLIST_SIZE, "Standard wordlist (rockyou.txt)");
        }

        let lower = trimmed.to_lowercase();
        if let Some(index) = self.top_wordlist.iter().position(|w| *w == lower) {
            let rank = (index + 1) as f64;
            return AttackEstimate::new(rank, "Top common passwords").with_rank(rank);
        }

        if in_extended_wordlist(&lower) {
            return AttackEstimate::new(EXTENDED_WORDLIST_RANK, "Extended wordlist (top 500K)")
                .with_rank(EXTENDED_WORDLIST_RANK);
        }

        let fallback = self.rule_based.estimate(trimmed);
        AttackEstimate::new(fallback.guesses.min(RULE_FALLBACK_CAP), fallback.description)
    }
}

fn in_extended_wordlist(lower: &str) -> bool {
    let len = lower.chars().count();
    if len < 6 {
        return true;
    }
    if len > 20 {
        return false;
    }
    is_letters_then_digits(lower) || is_digits_then_letters(lower) || is_word_number_word(lower)
}

/// `[a-z]+[0-9]+[a-z]+`
fn is_word_number_word(s: &str) -> bool {
    let head = s.chars().take_while(|c| c.is_ascii_lowercase()).count();
    if head == 0 {
        return false;
    }
    let rest = &s[head..];
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    let tail = &rest[digits..];
    digits > 0 && !tail.is_empty() && tail.chars().all(|c| c.is_ascii_lowercase())
}
