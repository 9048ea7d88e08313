//! Context section - flags personal info embedded in the password.

use super::SectionOutcome;
use crate::types::PasswordContext;

/// Warns when a username/email/site term appears inside the password.
///
/// Advisory only: the outcome never carries penalty bits.
pub fn context_section(password: &str, context: Option<&PasswordContext>) -> SectionOutcome {
    let mut outcome = SectionOutcome::default();
    let Some(context) = context else {
        return outcome;
    };

    if !context.matching_terms(password).is_empty() {
        outcome.warn("Password contains personal/context info (easy to guess).");
        outcome.suggest("Avoid using your username, email, or site name inside passwords.");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_section_without_context() {
        assert!(context_section("alice2024", None).is_clean());
    }

    #[test]
    fn test_context_section_username_match() {
        let ctx = PasswordContext::new().with_username("Alice");
        let outcome = context_section("xXaLiCe2024", Some(&ctx));
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.penalty_bits, 0.0);
    }

    #[test]
    fn test_context_section_email_domain_match() {
        let ctx = PasswordContext::new().with_email("bob@contoso.com");
        let outcome = context_section("Contoso!Rocks", Some(&ctx));
        assert!(outcome.warnings[0].contains("personal"));
    }

    #[test]
    fn test_context_section_no_match() {
        let ctx = PasswordContext::new()
            .with_username("carol")
            .with_site("example");
        assert!(context_section("Tr0ub4dor&3", Some(&ctx)).is_clean());
    }
}
