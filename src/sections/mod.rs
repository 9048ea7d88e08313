//! Password analysis sections
//!
//! Each section inspects one aspect of a password. Sections are pure and run
//! synchronously on every call.

mod charset;
mod context;
mod pattern;
mod policy;

pub use charset::{charset_size, CharClasses};
pub use context::context_section;
pub use pattern::pattern_section;
pub use policy::policy_section;

/// Outcome of a scoring or advisory section.
///
/// - `penalty_bits` - entropy bits removed from the brute-force estimate
/// - `warnings` - what was found
/// - `suggestions` - what to do about it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionOutcome {
    pub penalty_bits: f64,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl SectionOutcome {
    pub(crate) fn warn(&mut self, warning: &str) {
        self.warnings.push(warning.to_string());
    }

    pub(crate) fn suggest(&mut self, suggestion: &str) {
        self.suggestions.push(suggestion.to_string());
    }

    pub fn is_clean(&self) -> bool {
        self.penalty_bits == 0.0 && self.warnings.is_empty() && self.suggestions.is_empty()
    }
}
