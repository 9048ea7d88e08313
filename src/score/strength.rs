//! Entropy score discounted by realistic crack times.

use crate::math;
use crate::types::{ScenarioId, ScenarioResult, StrengthLabel};

/// Entropy at which the base score saturates.
const FULL_SCORE_BITS: f64 = 80.0;
const UNLISTED_WEIGHT: f64 = 0.25;

pub(crate) const MINUTE: f64 = 60.0;
pub(crate) const HOUR: f64 = 3_600.0;
pub(crate) const DAY: f64 = 86_400.0;
pub(crate) const WEEK: f64 = 604_800.0;
pub(crate) const MONTH: f64 = 2_592_000.0;
pub(crate) const YEAR: f64 = 31_536_000.0;

/// The attack profiles the score is discounted against, with their weights.
pub const CRITICAL_SCENARIOS: [(ScenarioId, f64); 4] = [
    (ScenarioId::GpuRulesFastHash, 0.4),
    (ScenarioId::WordlistRules, 0.3),
    (ScenarioId::WordlistBasic, 0.2),
    (ScenarioId::GpuRulesSlowHash, 0.1),
];

/// Piecewise-linear ramp: (upper bound in seconds, multiplier at the lower
/// bound, multiplier gained across the segment).
const RAMP: [(f64, f64, f64); 7] = [
    (MINUTE, 0.05, 0.05),
    (HOUR, 0.10, 0.10),
    (DAY, 0.20, 0.20),
    (WEEK, 0.40, 0.10),
    (MONTH, 0.50, 0.20),
    (YEAR, 0.70, 0.20),
    (YEAR * 10.0, 0.90, 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthScore {
    pub base_score: f64,
    pub score_percent: f64,
    pub label: StrengthLabel,
}

/// `round(clamp(bits / 80, 0, 1) * 100)`.
pub fn base_score_from_entropy(entropy_bits: f64) -> f64 {
    (math::clamp(entropy_bits / FULL_SCORE_BITS, 0.0, 1.0) * 100.0).round()
}

pub fn critical_scenarios(scenarios: &[ScenarioResult]) -> Vec<&ScenarioResult> {
    scenarios
        .iter()
        .filter(|s| CRITICAL_SCENARIOS.iter().any(|(id, _)| *id == s.id))
        .collect()
}

fn weight_of(id: ScenarioId) -> f64 {
    CRITICAL_SCENARIOS
        .iter()
        .find(|(critical, _)| *critical == id)
        .map(|(_, weight)| *weight)
        .unwrap_or(UNLISTED_WEIGHT)
}

/// Weighted mean expected time over `scenarios`, skipping non-finite times.
/// `None` when nothing carries weight.
pub fn weighted_expected_time<'a, I>(scenarios: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a ScenarioResult>,
{
    let (sum, total) = scenarios
        .into_iter()
        .filter(|s| s.expected_time_seconds.is_finite())
        .fold((0.0, 0.0), |(sum, total), s| {
            let weight = weight_of(s.id);
            (sum + s.expected_time_seconds * weight, total + weight)
        });

    if total == 0.0 {
        None
    } else {
        Some(sum / total)
    }
}

/// Weighted average over the critical profiles of `scenarios`.
pub fn critical_average_time(scenarios: &[ScenarioResult]) -> Option<f64> {
    weighted_expected_time(critical_scenarios(scenarios))
}

/// Score multiplier for an average crack time; `1.0` from ten years on.
pub fn crack_time_multiplier(average_seconds: f64) -> f64 {
    if !average_seconds.is_finite() {
        return 1.0;
    }
    let mut lower = 0.0;
    for (upper, start, span) in RAMP {
        if average_seconds < upper {
            let progress = (average_seconds.max(0.0) - lower) / (upper - lower);
            return start + progress * span;
        }
        lower = upper;
    }
    1.0
}

/// Applies the crack-time discount to `base_score`.
pub fn adjusted_score(base_score: f64, scenarios: &[ScenarioResult]) -> f64 {
    match critical_average_time(scenarios) {
        Some(average) => math::clamp(base_score * crack_time_multiplier(average), 0.0, 100.0),
        None => base_score,
    }
}

pub fn strength_score(entropy_bits: f64, scenarios: &[ScenarioResult]) -> StrengthScore {
    let base_score = base_score_from_entropy(entropy_bits);
    let score_percent = adjusted_score(base_score, scenarios);
    StrengthScore {
        base_score,
        score_percent,
        label: StrengthLabel::from_score(score_percent),
    }
}
