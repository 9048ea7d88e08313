//! Stronger alternatives to the password being typed.
//!
//! Suggestions are illustrative. They are not meant to be used as secrets.

mod passphrase;
mod token;

pub use passphrase::PassphraseGenerator;
pub use token::RandomTokenGenerator;

use crate::sections::{charset_size, CharClasses};
use crate::types::{unique_non_blank, PasswordContext};
use passphrase::MAX_PASSPHRASES;

const UPGRADE_MIN_LENGTH: usize = 16;
const SMALL_CHARSET: u32 = 40;
const FRESH_PASSPHRASES: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine {
    passphrases: PassphraseGenerator,
    tokens: RandomTokenGenerator,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// At most `count` (capped at five) suggestions.
    ///
    /// An empty password gets fresh passphrases only. Otherwise two upgrades
    /// of the password come first, followed by three fresh passphrases;
    /// duplicates and the input itself are dropped, so fewer than `count`
    /// may come back. Upgrades are skipped when the password embeds a
    /// context term, since they would carry it along.
    pub fn suggest(&self, password: &str, count: usize, context: Option<&PasswordContext>) -> Vec<String> {
        let count = count.min(MAX_PASSPHRASES);
        if count == 0 {
            return Vec::new();
        }

        let trimmed = password.trim();
        if trimmed.is_empty() {
            return self.passphrases.generate(count);
        }

        let leaks_context = context.is_some_and(|ctx| !ctx.matching_terms(trimmed).is_empty());

        let mut candidates = Vec::with_capacity(2 + FRESH_PASSPHRASES);
        if !leaks_context {
            candidates.push(self.upgrade_keeping_base(trimmed));
            candidates.push(self.upgrade_with_requirements(trimmed));
        }
        candidates.extend(self.passphrases.generate(FRESH_PASSPHRASES));

        unique_non_blank(candidates)
            .into_iter()
            .filter(|candidate| candidate != trimmed)
            .take(count)
            .collect()
    }

    /// `base-<passphrase>-<symbol><dd>`
    fn upgrade_keeping_base(&self, base: &str) -> String {
        format!(
            "{}-{}-{}{}",
            base,
            self.passphrases.generate_one(),
            self.tokens.symbol(),
            self.tokens.digits(2)
        )
    }

    fn upgrade_with_requirements(&self, base: &str) -> String {
        let classes = CharClasses::of(base);

        let mut out = capitalize_first(base);
        if !classes.lower {
            out.push_str(&self.tokens.letters(2));
        }
        if !classes.upper {
            out.push_str(&self.tokens.letters(2).to_uppercase());
        }
        if !classes.digit {
            out.push_str(&self.tokens.digits(2));
        }
        if !classes.symbol {
            out.push_str(&self.tokens.symbol());
        }

        let len = out.chars().count();
        if len < UPGRADE_MIN_LENGTH {
            out.push_str(&self.tokens.letters(UPGRADE_MIN_LENGTH - len));
        }

        let size = charset_size(base);
        if size > 0 && size < SMALL_CHARSET {
            out.push_str(&self.tokens.symbol());
            out.push_str(&self.tokens.digits(2));
        }
        out
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::passphrase::is_passphrase_shape;
    use super::*;

    #[test]
    fn test_suggest_zero_count() {
        let engine = SuggestionEngine::new();
        assert!(engine.suggest("", 0, None).is_empty());
        assert!(engine.suggest("hunter2", 0, None).is_empty());
    }

    #[test]
    fn test_suggest_empty_password_gives_passphrases() {
        let engine = SuggestionEngine::new();
        let out = engine.suggest("   ", 3, None);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|s| is_passphrase_shape(s)));
    }

    #[test]
    fn test_suggest_upgrades_first() {
        let engine = SuggestionEngine::new();
        let out = engine.suggest("sunflower", 5, None);
        assert!(out.len() >= 4 && out.len() <= 5);
        assert!(out[0].starts_with("sunflower-"));
        assert!(out[1].starts_with("Sunflower"));
        assert!(out.iter().all(|s| s != "sunflower"));
    }

    #[test]
    fn test_suggest_count_capped() {
        let engine = SuggestionEngine::new();
        assert!(engine.suggest("sunflower", 50, None).len() <= 5);
        assert_eq!(engine.suggest("sunflower", 2, None).len(), 2);
    }

    #[test]
    fn test_upgrade_with_requirements_fills_classes() {
        let engine = SuggestionEngine::new();
        let upgraded = engine.upgrade_with_requirements("abc");
        let classes = CharClasses::of(&upgraded);
        assert!(upgraded.starts_with("Abc"));
        assert!(classes.lower && classes.upper && classes.digit && classes.symbol);
        // padded to 16, then symbol + two digits for the small base charset
        assert_eq!(upgraded.chars().count(), 19);
    }

    #[test]
    fn test_upgrade_keeps_rich_base_short_tail() {
        let engine = SuggestionEngine::new();
        let upgraded = engine.upgrade_with_requirements("Correct-Horse-Battery-9");
        assert_eq!(upgraded, "Correct-Horse-Battery-9");
    }

    #[test]
    fn test_upgrade_keeping_base_shape() {
        let engine = SuggestionEngine::new();
        let upgraded = engine.upgrade_keeping_base("base");
        let rest = upgraded.strip_prefix("base-").unwrap();
        let (phrase, tail) = rest.split_at(rest.len() - 4);
        assert!(is_passphrase_shape(phrase.trim_end_matches('-')));
        assert_eq!(tail.len(), 4);
        assert!(tail[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_suggest_skips_upgrades_leaking_context() {
        let engine = SuggestionEngine::new();
        let ctx = PasswordContext::new().with_username("alice");
        let out = engine.suggest("alice1990", 5, Some(&ctx));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|s| is_passphrase_shape(s)));
    }
}
