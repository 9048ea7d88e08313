//! Policy section - the pass/warn/fail checklist shown next to the score.

use super::CharClasses;
use crate::types::{FindingStatus, PasswordContext, PolicyFinding};

const MIN_LENGTH: usize = 12;
const IDEAL_LENGTH: usize = 16;

/// Builds the advisory checklist. Findings never feed the numeric score.
///
/// The context finding is emitted only when the context yields at least one
/// usable term.
pub fn policy_section(password: &str, context: Option<&PasswordContext>) -> Vec<PolicyFinding> {
    let trimmed = password.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut findings = vec![length_finding(trimmed), variety_finding(trimmed)];
    if let Some(finding) = context.and_then(|ctx| context_finding(trimmed, ctx)) {
        findings.push(finding);
    }
    findings
}

fn length_finding(password: &str) -> PolicyFinding {
    let len = password.chars().count();
    let (status, detail) = if len < MIN_LENGTH {
        (
            FindingStatus::Fail,
            format!("Use at least {} characters (ideal {}+).", MIN_LENGTH, IDEAL_LENGTH),
        )
    } else if len < IDEAL_LENGTH {
        (
            FindingStatus::Warn,
            format!("Good start. {}+ characters is stronger.", IDEAL_LENGTH),
        )
    } else {
        (FindingStatus::Pass, "Length looks good.".to_string())
    };

    PolicyFinding {
        id: "length",
        label: "Length",
        status,
        detail: Some(detail),
    }
}

fn variety_finding(password: &str) -> PolicyFinding {
    let (status, detail) = match CharClasses::of(password).variety() {
        0 | 1 => (FindingStatus::Fail, "Add a mix of letters, numbers, and symbols."),
        2 => (FindingStatus::Warn, "Add one more character type to increase strength."),
        _ => (FindingStatus::Pass, "Variety looks good."),
    };

    PolicyFinding {
        id: "variety",
        label: "Character variety",
        status,
        detail: Some(detail.to_string()),
    }
}

fn context_finding(password: &str, context: &PasswordContext) -> Option<PolicyFinding> {
    if context.terms().is_empty() {
        return None;
    }

    let (status, detail) = if context.matching_terms(password).is_empty() {
        (FindingStatus::Pass, "No obvious context terms.")
    } else {
        (FindingStatus::Fail, "Password contains username/email/site terms.")
    };

    Some(PolicyFinding {
        id: "context",
        label: "Personal info",
        status,
        detail: Some(detail.to_string()),
    })
}
