//! Strength score and its explanation.

mod explanation;
mod strength;

pub use explanation::{explain_crack_time, explain_score, CrackTimeExplanation, ScoreExplanation};
pub use strength::{
    adjusted_score, base_score_from_entropy, crack_time_multiplier, critical_average_time, strength_score,
    StrengthScore, CRITICAL_SCENARIOS,
};

pub(crate) use strength::{DAY, HOUR, MINUTE, YEAR};
