//! Narrative rationale for the score and crack-time figures.
//!
//! Reuses the scoring helpers so the text can never disagree with the
//! number it explains.

use super::strength::{
    base_score_from_entropy, critical_average_time, critical_scenarios, DAY, HOUR, MINUTE, MONTH, YEAR,
};
use crate::types::ScenarioResult;

const BRUTE_FORCE_ONLY: &str = "Crack time estimates are based on brute-force entropy calculations.";

const CRITICAL_ATTACKS: &str = "The score uses the average expected crack time across four realistic attack \
scenarios: Rule-based GPU (fast hash), Wordlist attack (rockyou.txt), Wordlist + rules (GPU), and Rule-based \
GPU (slow hash). These methods use wordlists with transformation rules (capitalization, leetspeak, appending \
numbers) and are much faster than brute force.";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreExplanation {
    pub base_score: f64,
    pub entropy_bits: f64,
    pub adjusted_score: f64,
    pub adjustment_reason: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrackTimeExplanation<'a> {
    pub fastest_scenario: Option<&'a ScenarioResult>,
    pub text: String,
}

pub fn explain_score(entropy_bits: f64, final_score: f64, scenarios: &[ScenarioResult]) -> ScoreExplanation {
    let base_score = base_score_from_entropy(entropy_bits);
    let has_adjustment = (final_score - base_score).abs() > 0.5;

    let adjustment_reason = if has_adjustment {
        critical_average_time(scenarios).and_then(adjustment_reason)
    } else {
        None
    };

    let entropy_part = format!(
        "Base score: {}% from {} bits of entropy (length × charset variety, minus pattern penalties).",
        base_score,
        entropy_bits.round()
    );

    let text = match &adjustment_reason {
        Some(reason) => {
            let verb = if final_score < base_score {
                "reduced"
            } else {
                "adjusted"
            };
            format!(
                "{} Score {} to {}% because {}",
                entropy_part,
                verb,
                final_score.round(),
                lowercase_first(reason)
            )
        }
        None => format!("{} No crack-time adjustment applied.", entropy_part),
    };

    ScoreExplanation {
        base_score,
        entropy_bits,
        adjusted_score: final_score,
        adjustment_reason,
        text,
    }
}

pub fn explain_crack_time(scenarios: &[ScenarioResult]) -> CrackTimeExplanation<'_> {
    let critical = critical_scenarios(scenarios);
    let Some(average) = critical_average_time(scenarios) else {
        return CrackTimeExplanation {
            fastest_scenario: None,
            text: BRUTE_FORCE_ONLY.to_string(),
        };
    };

    let text = format!(
        "Average across realistic attacks: {} {} This is why the score was adjusted: real attackers use \
these methods, not pure brute force.",
        lowercase_first(&describe_time(average)),
        CRITICAL_ATTACKS
    );

    CrackTimeExplanation {
        fastest_scenario: critical.first().copied(),
        text,
    }
}

fn adjustment_reason(average_seconds: f64) -> Option<String> {
    let bucket = if average_seconds < MINUTE {
        "a minute"
    } else if average_seconds < HOUR {
        "an hour"
    } else if average_seconds < DAY {
        "a day"
    } else if average_seconds < MONTH {
        "a month"
    } else if average_seconds < YEAR {
        "a year"
    } else if average_seconds < YEAR * 10.0 {
        "10 years"
    } else {
        return None;
    };
    Some(format!(
        "Average crack time across rule-based and wordlist attacks is under {}.",
        bucket
    ))
}

fn describe_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "Crack time is effectively infinite.".to_string();
    }
    let (value, unit, plus) = if seconds < MINUTE {
        (seconds, "seconds", "")
    } else if seconds < HOUR {
        (seconds / MINUTE, "minutes", "")
    } else if seconds < DAY {
        (seconds / HOUR, "hours", "")
    } else if seconds < MONTH {
        (seconds / DAY, "days", "")
    } else if seconds < YEAR {
        (seconds / MONTH, "months", "")
    } else if seconds < YEAR * 10.0 {
        (seconds / YEAR, "years", "")
    } else {
        (seconds / YEAR, "years", "+")
    };
    format!("Worst-case crack time: {}{} {}.", value.round(), plus, unit)
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
