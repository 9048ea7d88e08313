//! Attacker profiles and expected/worst-case crack times.

use super::{AttackEstimate, RuleBasedAttackEstimator, WordlistAttackEstimator};
use crate::corpus::Corpus;
use crate::types::{ScenarioId, ScenarioResult};

/// One row of the attacker table.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackProfile {
    pub id: ScenarioId,
    pub name: String,
    pub guesses_per_second: f64,
}

impl AttackProfile {
    pub fn new(id: ScenarioId, name: impl Into<String>, guesses_per_second: f64) -> Self {
        Self {
            id,
            name: name.into(),
            guesses_per_second,
        }
    }
}

/// The built-in attacker table, in display order.
pub fn default_profiles() -> Vec<AttackProfile> {
    use ScenarioId::*;
    vec![
        AttackProfile::new(OnlineThrottled, "Online (rate-limited)", 0.1),
        AttackProfile::new(OnlineUnthrottled, "Online (no rate limit)", 10.0),
        AttackProfile::new(OfflineArgon2id, "Offline (argon2id, strong settings)", 50.0),
        AttackProfile::new(OfflineScrypt, "Offline (scrypt, strong settings)", 200.0),
        AttackProfile::new(OfflinePbkdf2, "Offline (PBKDF2, moderate settings)", 200_000.0),
        AttackProfile::new(OfflineSlowHash, "Offline (slow hash, e.g., bcrypt)", 2_000.0),
        AttackProfile::new(OfflineFastHash, "Offline (fast hash, GPU / fast hashes)", 1e10),
        AttackProfile::new(WordlistBasic, "Wordlist attack (rockyou.txt)", 1e6),
        AttackProfile::new(WordlistRules, "Wordlist + rules (GPU)", 1e9),
        AttackProfile::new(GpuRulesFastHash, "Rule-based GPU (fast hash)", 1e10),
        AttackProfile::new(GpuRulesSlowHash, "Rule-based GPU (slow hash)", 10_000.0),
    ]
}

/// Maps guess counts through a fixed table of attacker profiles.
#[derive(Debug, Clone)]
pub struct CrackTimeEstimator {
    profiles: Vec<AttackProfile>,
    wordlist: WordlistAttackEstimator,
    rule_based: RuleBasedAttackEstimator,
}

impl Default for CrackTimeEstimator {
    fn default() -> Self {
        Self::new(default_profiles(), &Corpus::default())
    }
}

impl CrackTimeEstimator {
    pub fn new(profiles: Vec<AttackProfile>, corpus: &Corpus) -> Self {
        Self {
            profiles,
            wordlist: WordlistAttackEstimator::new(corpus),
            rule_based: RuleBasedAttackEstimator::new(corpus),
        }
    }

    pub fn profiles(&self) -> &[AttackProfile] {
        &self.profiles
    }

    /// One result per profile, in table order.
    ///
    /// Brute-force profiles use `brute_force_guesses`; smart profiles ask the
    /// wordlist (`wordlist_*`) or rule-based (`gpu_rules_*`) estimator.
    pub fn estimate(&self, password: &str, brute_force_guesses: f64) -> Vec<ScenarioResult> {
        let brute_force = if brute_force_guesses.is_nan() {
            0.0
        } else {
            brute_force_guesses.max(0.0)
        };

        let needs_smart = self.profiles.iter().any(|p| p.id.is_smart());
        let (wordlist, rules) = if needs_smart {
            (
                Some(self.wordlist.estimate(password)),
                Some(self.rule_based.estimate(password)),
            )
        } else {
            (None, None)
        };

        self.profiles
            .iter()
            .map(|profile| {
                let smart: Option<&AttackEstimate> = match profile.id {
                    id if id.is_wordlist() => wordlist.as_ref(),
                    id if id.is_smart() => rules.as_ref(),
                    _ => None,
                };
                let (guesses, rank) = match smart {
                    Some(estimate) => (estimate.guesses, estimate.corpus_rank),
                    None => (brute_force, None),
                };
                let (expected, worst) = scenario_times(guesses, rank, profile.guesses_per_second);

                ScenarioResult {
                    id: profile.id,
                    name: profile.name.clone(),
                    guesses_per_second: profile.guesses_per_second,
                    expected_time_seconds: expected,
                    worst_case_time_seconds: worst,
                }
            })
            .collect()
    }
}

/// `(expected, worst_case)` seconds for one profile.
///
/// A known corpus rank below the guess count means the attacker knows where
/// to look: both times are `rank / rate` with no halving. Otherwise the
/// expectation is the midpoint of a uniform search.
pub(crate) fn scenario_times(guesses: f64, rank: Option<f64>, guesses_per_second: f64) -> (f64, f64) {
    if guesses_per_second <= 0.0 || guesses_per_second.is_nan() {
        return (f64::INFINITY, f64::INFINITY);
    }
    match rank {
        Some(rank) if rank < guesses => {
            let time = rank / guesses_per_second;
            (time, time)
        }
        _ => (
            guesses / (2.0 * guesses_per_second),
            guesses / guesses_per_second,
        ),
    }
}

/// Primary scenario to headline plus the rest, order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioView<'a> {
    pub primary: Option<&'a ScenarioResult>,
    pub others: Vec<&'a ScenarioResult>,
}

impl<'a> ScenarioView<'a> {
    /// Primary is `preferred` when present, else the offline fast-hash
    /// profile, else the first scenario.
    pub fn select(scenarios: &'a [ScenarioResult], preferred: Option<ScenarioId>) -> Self {
        let primary = preferred
            .and_then(|id| scenarios.iter().find(|s| s.id == id))
            .or_else(|| scenarios.iter().find(|s| s.id == ScenarioId::OfflineFastHash))
            .or_else(|| scenarios.first());

        let others = match primary {
            Some(p) => scenarios.iter().filter(|s| s.id != p.id).collect(),
            None => Vec::new(),
        };
        Self { primary, others }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_order_is_fixed() {
        let scenarios = CrackTimeEstimator::default().estimate("abc", 1000.0);
        let ids: Vec<_> = scenarios.iter().map(|s| s.id).collect();
        let expected: Vec<_> = default_profiles().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_brute_force_times() {
        let scenarios = CrackTimeEstimator::default().estimate("Kx9!mQzTr2#vLp8w", 2000.0);
        let online = scenarios
            .iter()
            .find(|s| s.id == ScenarioId::OnlineUnthrottled)
            .unwrap();
        assert_eq!(online.expected_time_seconds, 100.0);
        assert_eq!(online.worst_case_time_seconds, 200.0);
    }

    #[test]
    fn test_zero_rate_is_infinite() {
        let profiles = vec![AttackProfile::new(ScenarioId::OnlineThrottled, "stalled", 0.0)];
        let estimator = CrackTimeEstimator::new(profiles, &Corpus::default());
        let scenarios = estimator.estimate("abc", 10.0);
        assert!(scenarios[0].expected_time_seconds.is_infinite());
        assert!(scenarios[0].worst_case_time_seconds.is_infinite());
    }

    #[test]
    fn test_rank_bypasses_halving() {
        assert_eq!(scenario_times(1000.0, Some(10.0), 10.0), (1.0, 1.0));
        // rank not smaller than guesses falls back to the uniform model
        assert_eq!(scenario_times(10.0, Some(10.0), 10.0), (0.5, 1.0));
        assert_eq!(scenario_times(10.0, None, 10.0), (0.5, 1.0));
    }

    #[test]
    fn test_smart_profiles_use_wordlist_rank() {
        let scenarios = CrackTimeEstimator::default().estimate("password", 1e12);
        let basic = scenarios
            .iter()
            .find(|s| s.id == ScenarioId::WordlistBasic)
            .unwrap();
        // rank 1 is the full guess count, so uniform halving applies
        assert_eq!(basic.worst_case_time_seconds, 1.0 / 1e6);

        let gpu_slow = scenarios
            .iter()
            .find(|s| s.id == ScenarioId::GpuRulesSlowHash)
            .unwrap();
        assert_eq!(gpu_slow.expected_time_seconds, 100_000.0 / 10_000.0);
        assert_eq!(gpu_slow.expected_time_seconds, gpu_slow.worst_case_time_seconds);
    }

    #[test]
    fn test_times_ordered_and_decreasing_in_rate() {
        for guesses in [1.0, 1e6, 1e20] {
            let mut previous: Option<(f64, f64)> = None;
            for rate in [0.1, 10.0, 1e4, 1e10] {
                let (expected, worst) = scenario_times(guesses, None, rate);
                assert!(expected <= worst);
                if let Some((pe, pw)) = previous {
                    assert!(expected < pe);
                    assert!(worst < pw);
                }
                previous = Some((expected, worst));
            }
        }
    }

    #[test]
    fn test_scenario_view_selection() {
        let scenarios = CrackTimeEstimator::default().estimate("abc", 100.0);

        let view = ScenarioView::select(&scenarios, None);
        assert_eq!(view.primary.map(|s| s.id), Some(ScenarioId::OfflineFastHash));
        assert_eq!(view.others.len(), scenarios.len() - 1);

        let view = ScenarioView::select(&scenarios, Some(ScenarioId::OfflineArgon2id));
        assert_eq!(view.primary.map(|s| s.id), Some(ScenarioId::OfflineArgon2id));

        let view = ScenarioView::select(&[], None);
        assert!(view.primary.is_none());
        assert!(view.others.is_empty());
    }
}
