//! Rule-based attack model: a large wordlist run through mangling rules.

use super::AttackEstimate;
use crate::corpus::Corpus;

/// Entries in the reference cracking wordlist (rockyou-sized).
pub const WORDLIST_SIZE: f64 = 14_000_000.0;
const COMMON_RULES: f64 = 150.0;
const AGGRESSIVE_RULES: f64 = 500.0;
const EXTENDED_RULES: f64 = AGGRESSIVE_RULES * 10.0;
const MAX_RULE_MULTIPLIER: f64 = 1000.0;
const SUBSTRING_RANK_CAP: f64 = 100_000.0;
const SHAPE_RANK_CAP: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone)]
pub struct RuleBasedAttackEstimator {
    common_substrings: Vec<String>,
}

impl Default for RuleBasedAttackEstimator {
    fn default() -> Self {
        Self::new(&Corpus::default())
    }
}

impl RuleBasedAttackEstimator {
    pub fn new(corpus: &Corpus) -> Self {
        Self {
            common_substrings: corpus.rule_substrings.clone(),
        }
    }

    pub fn estimate(&self, password: &str) -> AttackEstimate {
        let trimmed = password.trim();
        if trimmed.is_empty() {
            return AttackEstimate::new(WORDLIST_SIZE * COMMON_RULES, "Standard wordlist + rules");
        }

        let lower = trimmed.to_lowercase();
        let substring_hit = self
            .common_substrings
            .iter()
            .any(|s| lower.contains(s.as_str()));

        if substring_hit || has_common_shape(trimmed) {
            let guesses = WORDLIST_SIZE * rule_multiplier(trimmed);
            let rank_cap = if substring_hit {
                SUBSTRING_RANK_CAP
            } else {
                SHAPE_RANK_CAP
            };
            return AttackEstimate::new(guesses, "Common password with rule transformations")
                .with_rank(guesses.min(rank_cap));
        }

        match complexity(trimmed) {
            Complexity::Low => {
                AttackEstimate::new(WORDLIST_SIZE * COMMON_RULES, "Simple pattern, likely in wordlist")
            }
            Complexity::Medium => AttackEstimate::new(
                WORDLIST_SIZE * AGGRESSIVE_RULES,
                "Moderate complexity, aggressive rules",
            ),
            Complexity::High => {
                AttackEstimate::new(WORDLIST_SIZE * EXTENDED_RULES, "Complex password, extended rules")
            }
        }
    }
}

/// Shapes cracking rules enumerate first: too short, single-class, or a
/// lowercase word glued to a number.
pub(crate) fn has_common_shape(password: &str) -> bool {
    if password.chars().count() < 6 {
        return true;
    }
    all_of(password, |c| c.is_ascii_lowercase())
        || all_of(password, |c| c.is_ascii_uppercase())
        || all_of(password, |c| c.is_ascii_digit())
        || is_letters_then_digits(password)
        || is_digits_then_letters(password)
}

fn all_of(s: &str, pred: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(pred)
}

/// `[a-z]+[0-9]+`
pub(crate) fn is_letters_then_digits(s: &str) -> bool {
    let head = s.chars().take_while(|c| c.is_ascii_lowercase()).count();
    head > 0 && head < s.len() && all_of(&s[head..], |c| c.is_ascii_digit())
}

/// `[0-9]+[a-z]+`
pub(crate) fn is_digits_then_letters(s: &str) -> bool {
    let head = s.chars().take_while(|c| c.is_ascii_digit()).count();
    head > 0 && head < s.len() && all_of(&s[head..], |c| c.is_ascii_lowercase())
}

fn rule_multiplier(password: &str) -> f64 {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut multiplier = 1.0_f64;
    if !(has_lower && has_upper) {
        multiplier *= 2.0;
    }
    if has_digit {
        let trailing = password.chars().rev().take_while(|c| c.is_ascii_digit()).count();
        multiplier *= if trailing > 0 {
            10f64.powi(trailing.min(3) as i32).min(100.0)
        } else {
            100.0
        };
    }
    if has_symbol {
        multiplier *= 20.0;
    }
    multiplier.min(MAX_RULE_MULTIPLIER)
}

fn complexity(password: &str) -> Complexity {
    let length = password.chars().count();
    let classes = [
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .iter()
    .filter(|&&b| b)
    .count();

    if length < 8 || classes <= 1 {
        Complexity::Low
    } else if length < 12 || classes <= 2 {
        Complexity::Medium
    } else if length >= 16 && classes >= 3 {
        Complexity::High
    } else {
        Complexity::Medium
    }
}
