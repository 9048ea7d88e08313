//! Pattern section - detects weak structure and prices it in entropy bits.

use super::{CharClasses, SectionOutcome};
use crate::corpus::Corpus;

const COMMON_BITS: f64 = 30.0;
const SINGLE_CHAR_BITS: f64 = 20.0;
const REPEAT_RUN_BITS: f64 = 6.0;
const SEQUENCE_BITS: f64 = 10.0;
const YEAR_BITS: f64 = 6.0;
const KEYBOARD_BITS: f64 = 10.0;

const SEQUENCES: [&str; 2] = ["abcdefghijklmnopqrstuvwxyz", "0123456789"];
const SEQUENCE_WINDOW: usize = 4;

/// Scans the trimmed password for weak patterns.
///
/// Penalties add up without a cap; the guess estimator floors the resulting
/// entropy at zero. Length and variety advice is emitted regardless of
/// penalties and carries no bits.
pub fn pattern_section(password: &str, corpus: &Corpus) -> SectionOutcome {
    let mut outcome = SectionOutcome::default();

    let normalized = password.trim();
    if normalized.is_empty() {
        return outcome;
    }
    let lower = normalized.to_lowercase();
    let chars: Vec<char> = normalized.chars().collect();

    if corpus.is_common(&lower) {
        outcome.warn("This password is extremely common.");
        outcome.penalty_bits += COMMON_BITS;
    }

    if is_single_char_repeated(&chars) {
        outcome.warn("Repeated single character pattern detected.");
        outcome.suggest("Avoid repeating the same character.");
        outcome.penalty_bits += SINGLE_CHAR_BITS;
    }

    if has_repeat_run(&chars) {
        outcome.warn("Repeated character runs reduce strength.");
        outcome.suggest("Use more variety instead of long repeats.");
        outcome.penalty_bits += REPEAT_RUN_BITS;
    }

    if has_sequence(&lower) {
        outcome.warn("Sequence pattern detected (e.g., abc, 123).");
        outcome.suggest("Avoid obvious sequences.");
        outcome.penalty_bits += SEQUENCE_BITS;
    }

    if looks_like_year(&chars) {
        outcome.warn("Year-like pattern detected.");
        outcome.suggest("Avoid using years or dates.");
        outcome.penalty_bits += YEAR_BITS;
    }

    if corpus.keyboard_walks.iter().any(|walk| lower.contains(walk.as_str())) {
        outcome.warn("Keyboard pattern detected (e.g., qwerty).");
        outcome.suggest("Avoid keyboard walks.");
        outcome.penalty_bits += KEYBOARD_BITS;
    }

    if chars.len() < 12 {
        outcome.suggest("Aim for 12–16+ characters (length matters most).");
    }

    let classes = CharClasses::of(normalized);
    if !classes.mixed_case() {
        outcome.suggest("Mix uppercase and lowercase letters.");
    }
    if !classes.digit {
        outcome.suggest("Add digits.");
    }
    if !classes.symbol {
        outcome.suggest("Add symbols (e.g., !@#$).");
    }

    outcome
}

fn is_single_char_repeated(chars: &[char]) -> bool {
    chars.len() >= 2 && chars.iter().all(|&c| c == chars[0])
}

/// Three or more identical characters in a row.
fn has_repeat_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn has_sequence(lower: &str) -> bool {
    SEQUENCES.iter().any(|seq| {
        let forward: Vec<char> = seq.chars().collect();
        let reverse: Vec<char> = forward.iter().rev().copied().collect();
        contains_any_window(lower, &forward) || contains_any_window(lower, &reverse)
    })
}

fn contains_any_window(haystack: &str, sequence: &[char]) -> bool {
    sequence.windows(SEQUENCE_WINDOW).any(|window| {
        let needle: String = window.iter().collect();
        haystack.contains(&needle)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A standalone 19xx/20xx token, bounded by non-word characters or the ends.
fn looks_like_year(chars: &[char]) -> bool {
    if chars.len() < 4 {
        return false;
    }
    (0..=chars.len() - 4).any(|i| {
        let window = &chars[i..i + 4];
        let century = matches!((window[0], window[1]), ('1', '9') | ('2', '0'));
        let digits = window.iter().all(|c| c.is_ascii_digit());
        let open = i == 0 || !is_word_char(chars[i - 1]);
        let close = i + 4 == chars.len() || !is_word_char(chars[i + 4]);
        century && digits && open && close
    })
}
