//! Password analyzer - main analysis pipeline.

use secrecy::{ExposeSecret, SecretString};

use crate::corpus::{Corpus, CorpusError};
use crate::estimate::{default_profiles, estimate_guesses, AttackProfile, CrackTimeEstimator};
use crate::score::{self, strength_score, CrackTimeExplanation, ScoreExplanation};
use crate::sections::{charset_size, context_section, pattern_section, policy_section};
use crate::suggest::SuggestionEngine;
use crate::types::{unique_non_blank, AnalysisResult, PasswordContext};

#[cfg(feature = "async")]
use crate::breach::{BreachChecker, BreachError, BreachWatcher, RangeClient};
#[cfg(feature = "async")]
use crate::enhancer::{self, Enhancer};
#[cfg(feature = "async")]
use crate::types::BreachResult;
#[cfg(feature = "async")]
use std::sync::Arc;
#[cfg(feature = "async")]
use std::time::Duration;
#[cfg(feature = "async")]
use tokio::sync::mpsc;
#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

/// Synchronous scoring pipeline over an injected corpus and profile table.
#[derive(Debug, Clone)]
pub struct PasswordAnalyzer {
    corpus: Corpus,
    crack_times: CrackTimeEstimator,
    suggestions: SuggestionEngine,
}

impl Default for PasswordAnalyzer {
    fn default() -> Self {
        Self::new(Corpus::default())
    }
}

impl PasswordAnalyzer {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_profiles(corpus, default_profiles())
    }

    pub fn with_profiles(corpus: Corpus, profiles: Vec<AttackProfile>) -> Self {
        let crack_times = CrackTimeEstimator::new(profiles, &corpus);
        Self {
            corpus,
            crack_times,
            suggestions: SuggestionEngine::new(),
        }
    }

    /// Built-in corpus, extended from `PWD_ANALYZER_COMMON_PASSWORDS` when set.
    pub fn from_env() -> Result<Self, CorpusError> {
        Ok(Self::new(Corpus::from_env()?))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Full assessment of `password`. Pure: same input, same result.
    ///
    /// Context terms only produce advice and a policy finding; they never
    /// change entropy or score.
    pub fn analyze(&self, password: &SecretString, context: Option<&PasswordContext>) -> AnalysisResult {
        let pwd = password.expose_secret();
        let password_length = pwd.chars().count();
        let charset_size = charset_size(pwd);

        // Orchestrator: advisory sections feed one penalty total
        let outcomes = [
            ("pattern", pattern_section(pwd, &self.corpus)),
            ("context", context_section(pwd, context)),
        ];

        let mut penalty_bits = 0.0;
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        for (section_name, outcome) in outcomes {
            #[cfg(feature = "tracing")]
            if !outcome.is_clean() {
                tracing::debug!(
                    section = section_name,
                    penalty_bits = outcome.penalty_bits,
                    warnings = outcome.warnings.len(),
                    "Section flagged password"
                );
            }
            #[cfg(not(feature = "tracing"))]
            let _ = section_name;

            penalty_bits += outcome.penalty_bits;
            warnings.extend(outcome.warnings);
            suggestions.extend(outcome.suggestions);
        }

        let estimate = estimate_guesses(password_length, charset_size, penalty_bits);
        let scenarios = self.crack_times.estimate(pwd, estimate.guesses);
        let score = strength_score(estimate.entropy_bits, &scenarios);

        AnalysisResult {
            password_length,
            charset_size,
            entropy_bits: estimate.entropy_bits,
            guesses: estimate.guesses,
            score_percent: score.score_percent,
            label: score.label,
            scenarios,
            warnings: unique_non_blank(warnings),
            suggestions: unique_non_blank(suggestions),
            insights: None,
            policy_findings: Some(policy_section(pwd, context)),
        }
    }

    /// Up to `count` (max five) stronger alternatives. Not secret-grade.
    pub fn suggest(&self, password: &SecretString, count: usize, context: Option<&PasswordContext>) -> Vec<String> {
        self.suggestions.suggest(password.expose_secret(), count, context)
    }

    pub fn explain_score(&self, result: &AnalysisResult) -> ScoreExplanation {
        score::explain_score(result.entropy_bits, result.score_percent, &result.scenarios)
    }

    pub fn explain_crack_time<'a>(&self, result: &'a AnalysisResult) -> CrackTimeExplanation<'a> {
        score::explain_crack_time(&result.scenarios)
    }
}

/// Analyzes `password` with the built-in corpus and profile table.
pub fn analyze_password(password: &SecretString, context: Option<&PasswordContext>) -> AnalysisResult {
    PasswordAnalyzer::default().analyze(password, context)
}

/// Analyzer plus the two asynchronous refiners: an enhancer and a breach checker.
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct PasswordEngine<E, C> {
    analyzer: PasswordAnalyzer,
    enhancer: E,
    breach: Arc<BreachChecker<C>>,
}

#[cfg(feature = "async")]
impl<E: Enhancer, C: RangeClient> PasswordEngine<E, C> {
    pub fn new(analyzer: PasswordAnalyzer, enhancer: E, client: C) -> Self {
        Self {
            analyzer,
            enhancer,
            breach: Arc::new(BreachChecker::new(client)),
        }
    }

    pub fn analyzer(&self) -> &PasswordAnalyzer {
        &self.analyzer
    }

    pub fn breach_checker(&self) -> &BreachChecker<C> {
        &self.breach
    }

    pub fn analyze(&self, password: &SecretString, context: Option<&PasswordContext>) -> AnalysisResult {
        self.analyzer.analyze(password, context)
    }

    pub fn suggest(&self, password: &SecretString, count: usize, context: Option<&PasswordContext>) -> Vec<String> {
        self.analyzer.suggest(password, count, context)
    }

    /// Loads the enhancer ahead of the first [`enhance`](Self::enhance).
    /// Without it the first enhancement may be slower.
    pub async fn warm_up(&self) {
        self.enhancer.warm_up().await;
    }

    /// Refines `base` with the enhancer. Returns `base` unchanged when the
    /// password is empty, the token is cancelled or the enhancer fails.
    pub async fn enhance(
        &self,
        password: &SecretString,
        base: AnalysisResult,
        token: Option<&CancellationToken>,
    ) -> AnalysisResult {
        enhancer::enhance(&self.enhancer, password, base, token).await
    }

    /// Breach count via the k-anonymity range lookup; `Ok(None)` when cancelled.
    pub async fn check_breach(
        &self,
        password: &SecretString,
        token: Option<&CancellationToken>,
    ) -> Result<Option<BreachResult>, BreachError> {
        self.breach.check(password, token).await
    }
}

#[cfg(feature = "async")]
impl<E: Enhancer, C: RangeClient + 'static> PasswordEngine<E, C> {
    /// Debounced watcher sharing this engine's range cache.
    pub fn breach_watcher(&self, debounce: Duration) -> BreachWatcher<C> {
        BreachWatcher::new(Arc::clone(&self.breach), debounce)
    }
}

#[cfg(all(feature = "http", feature = "zxcvbn"))]
impl PasswordEngine<crate::enhancer::ZxcvbnEnhancer, crate::breach::HttpRangeClient> {
    /// zxcvbn enhancer and an HTTP range client built from `config`.
    pub fn with_config(analyzer: PasswordAnalyzer, config: &crate::breach::BreachConfig) -> Result<Self, BreachError> {
        let client = crate::breach::HttpRangeClient::new(config)?;
        Ok(Self::new(analyzer, crate::enhancer::ZxcvbnEnhancer::new(), client))
    }
}

/// Sends the synchronous analysis, then the enhanced one unless cancelled.
///
/// The second message is skipped when enhancement changed nothing.
#[cfg(feature = "async")]
pub async fn analyze_password_tx<E: Enhancer, C: RangeClient>(
    engine: &PasswordEngine<E, C>,
    password: &SecretString,
    context: Option<&PasswordContext>,
    token: CancellationToken,
    tx: mpsc::Sender<AnalysisResult>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("analysis is about to start...");

    let base = engine.analyze(password, context);
    if let Err(e) = tx.send(base.clone()).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password analysis result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
        return;
    }

    if token.is_cancelled() {
        return;
    }
    let enhanced = engine.enhance(password, base.clone(), Some(&token)).await;
    if token.is_cancelled() || enhanced == base {
        return;
    }

    if let Err(e) = tx.send(enhanced).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send enhanced analysis result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FindingStatus, ScenarioId, StrengthLabel};
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string().into())
    }

    fn set_env(key: &str, value: &str) {
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn remove_env(key: &str) {
        unsafe {
            std::env::remove_var(key);
        }
    }

    const COMMON_WARNING: &str = "This password is extremely common.";

    #[test]
    fn test_analyze_empty_password() {
        let result = analyze_password(&secret(""), None);
        assert_eq!(result.password_length, 0);
        assert_eq!(result.charset_size, 0);
        assert_eq!(result.entropy_bits, 0.0);
        assert_eq!(result.guesses, 0.0);
        assert_eq!(result.score_percent, 0.0);
        assert_eq!(result.label, StrengthLabel::VeryWeak);
        assert!(result.warnings.is_empty());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.policy_findings, Some(Vec::new()));
        assert_eq!(result.scenarios.len(), default_profiles().len());
    }

    #[test]
    fn test_common_passwords_flagged_and_penalized() {
        for pwd in ["password", "123456"] {
            let result = analyze_password(&secret(pwd), None);
            assert!(
                result.warnings.iter().any(|w| w == COMMON_WARNING),
                "{pwd} not flagged"
            );
            let unpenalized = estimate_guesses(result.password_length, result.charset_size, 0.0);
            assert!(result.entropy_bits < unpenalized.entropy_bits);
        }
    }

    #[test]
    fn test_bounds_hold() {
        let analyzer = PasswordAnalyzer::default();
        for pwd in [
            "a",
            "aaaaaaaaaaaa",
            "abcd1234",
            "Summer2024!",
            "correct horse battery staple",
            "Kx9!mQzTr2#vLp8w@Yb4",
            "пароль",
        ] {
            let result = analyzer.analyze(&secret(pwd), None);
            // Class sizes 26 + 26 + 10 + 33 + 1 give a widest alphabet of 96,
            // so the ceiling is len * log2(96), not the printable-ASCII log2(94).
            let ceiling = result.password_length as f64 * (96f64).log2();
            assert!(result.entropy_bits >= 0.0);
            assert!(result.entropy_bits <= ceiling, "{pwd}");
            assert!((0.0..=100.0).contains(&result.score_percent), "{pwd}");
            assert!(result.guesses >= 0.0);
            for scenario in &result.scenarios {
                assert!(scenario.expected_time_seconds <= scenario.worst_case_time_seconds);
            }
        }
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let analyzer = PasswordAnalyzer::default();
        let ctx = PasswordContext::new().with_email("bob@example.com");
        let first = analyzer.analyze(&secret("bobby-Tables-77"), Some(&ctx));
        let second = analyzer.analyze(&secret("bobby-Tables-77"), Some(&ctx));
        assert_eq!(first, second);
    }

    #[test]
    fn test_context_is_advisory_only() {
        let analyzer = PasswordAnalyzer::default();
        let ctx = PasswordContext::new().with_username("alice");
        let with_ctx = analyzer.analyze(&secret("alice-Rides-42"), Some(&ctx));
        let without = analyzer.analyze(&secret("alice-Rides-42"), None);

        assert_eq!(with_ctx.entropy_bits, without.entropy_bits);
        assert_eq!(with_ctx.score_percent, without.score_percent);
        assert!(with_ctx.warnings.len() > without.warnings.len());

        let findings = with_ctx.policy_findings.unwrap();
        let context_finding = findings.iter().find(|f| f.id == "context").unwrap();
        assert_eq!(context_finding.status, FindingStatus::Fail);
    }

    #[test]
    fn test_strong_beats_weak() {
        let analyzer = PasswordAnalyzer::default();
        let weak = analyzer.analyze(&secret("password"), None);
        let strong = analyzer.analyze(&secret("Kx9!mQzTr2#vLp8w@Yb4"), None);
        assert!(strong.score_percent > weak.score_percent + 20.0);
        assert!(strong.label > weak.label);
    }

    #[test]
    fn test_corpus_rank_drives_smart_scenarios() {
        let result = analyze_password(&secret("password"), None);

        // rank 1 on the top list, no bypass since rank == guesses
        let basic = result.scenario(ScenarioId::WordlistBasic).unwrap();
        assert_eq!(basic.worst_case_time_seconds, 1.0 / basic.guesses_per_second);

        // rule attack knows the rank, so no halving
        let rules = result.scenario(ScenarioId::GpuRulesFastHash).unwrap();
        assert_eq!(rules.expected_time_seconds, rules.worst_case_time_seconds);
        assert!(rules.expected_time_seconds < 1.0);
    }

    #[test]
    fn test_custom_profiles() {
        let profiles = vec![AttackProfile::new(ScenarioId::OnlineThrottled, "slow", 1.0)];
        let analyzer = PasswordAnalyzer::with_profiles(Corpus::default(), profiles);
        let result = analyzer.analyze(&secret("abcXYZ12"), None);
        assert_eq!(result.scenarios.len(), 1);
        assert_eq!(result.scenarios[0].name, "slow");
    }

    #[test]
    fn test_explanations_use_result() {
        let analyzer = PasswordAnalyzer::default();
        let result = analyzer.analyze(&secret("Summer2024!"), None);
        let score = analyzer.explain_score(&result);
        assert_eq!(score.adjusted_score, result.score_percent);
        assert!(!score.text.is_empty());
        let crack = analyzer.explain_crack_time(&result);
        assert!(crack.fastest_scenario.is_some());
    }

    #[test]
    fn test_suggest_respects_count() {
        let analyzer = PasswordAnalyzer::default();
        assert!(analyzer.suggest(&secret("hunter2"), 0, None).is_empty());
        assert_eq!(analyzer.suggest(&secret(""), 3, None).len(), 3);
    }

    #[test]
    #[serial]
    fn test_from_env_loads_extra_common_passwords() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Tr0ub4dor&3").unwrap();
        set_env(crate::corpus::COMMON_PASSWORDS_ENV, file.path().to_str().unwrap());

        let analyzer = PasswordAnalyzer::from_env().unwrap();
        let result = analyzer.analyze(&secret("Tr0ub4dor&3"), None);
        assert!(result.warnings.iter().any(|w| w == COMMON_WARNING));

        remove_env(crate::corpus::COMMON_PASSWORDS_ENV);
    }

    #[cfg(feature = "async")]
    mod engine {
        use super::*;
        use crate::breach::testing::MockRangeClient;
        use crate::breach::{sha1_hex_upper, BreachStatus};
        use crate::enhancer::testing::MockEnhancer;
        use crate::enhancer::{EnhancerReport, PatternMatch};
        use std::sync::atomic::Ordering;

        fn report() -> EnhancerReport {
            EnhancerReport {
                guesses: 16.0,
                matches: vec![PatternMatch {
                    pattern: "dictionary".to_string(),
                    token: "password".to_string(),
                }],
                warning: Some("This is a top-10 common password.".to_string()),
                suggestions: Vec::new(),
            }
        }

        fn engine_with(body: &str) -> PasswordEngine<MockEnhancer, MockRangeClient> {
            PasswordEngine::new(
                PasswordAnalyzer::default(),
                MockEnhancer::with_report(report()),
                MockRangeClient::with_body(body),
            )
        }

        #[tokio::test]
        async fn test_enhance_refines_guesses() {
            let engine = engine_with("");
            let pwd = secret("password");
            let base = engine.analyze(&pwd, None);
            let enhanced = engine.enhance(&pwd, base.clone(), None).await;

            assert_eq!(enhanced.guesses, 16.0);
            assert_eq!(enhanced.entropy_bits, 4.0);
            assert_eq!(enhanced.score_percent, base.score_percent);
            assert_eq!(enhanced.insights.as_ref().map(Vec::len), Some(1));
        }

        #[tokio::test]
        async fn test_enhance_skips_when_cancelled_or_empty() {
            let engine = engine_with("");
            let token = CancellationToken::new();
            token.cancel();

            let base = engine.analyze(&secret("password"), None);
            assert_eq!(engine.enhance(&secret("password"), base.clone(), Some(&token)).await, base);

            let empty = engine.analyze(&secret(""), None);
            assert_eq!(engine.enhance(&secret(""), empty.clone(), None).await, empty);
        }

        #[tokio::test]
        async fn test_warm_up_delegates() {
            let engine = engine_with("");
            engine.warm_up().await;
            assert_eq!(engine.enhancer.warm_ups.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_check_breach_through_engine() {
            let body = format!("{}:37\n", &sha1_hex_upper("password")[5..]);
            let engine = engine_with(&body);
            let result = engine.check_breach(&secret("password"), None).await.unwrap();
            assert_eq!(result.map(|r| r.breach_count), Some(37));
        }

        #[tokio::test(start_paused = true)]
        async fn test_watcher_shares_engine_cache() {
            let body = format!("{}:37\n", &sha1_hex_upper("password")[5..]);
            let engine = engine_with(&body);
            engine.check_breach(&secret("password"), None).await.unwrap();

            let watcher = engine.breach_watcher(Duration::from_millis(450));
            watcher.update(&secret("password")).unwrap().await.unwrap();
            assert_eq!(watcher.status(), BreachStatus::Compromised { breach_count: 37 });
            assert_eq!(engine.breach_checker().client().requests().len(), 1);
        }

        #[tokio::test]
        async fn test_analyze_tx_sends_base_then_enhanced() {
            let engine = engine_with("");
            let (tx, mut rx) = mpsc::channel(4);
            analyze_password_tx(&engine, &secret("password"), None, CancellationToken::new(), tx).await;

            let base = rx.recv().await.unwrap();
            let enhanced = rx.recv().await.unwrap();
            assert!(base.insights.is_none());
            assert_eq!(enhanced.guesses, 16.0);
            assert!(rx.recv().await.is_none());
        }

        #[tokio::test]
        async fn test_analyze_tx_cancelled_sends_base_only() {
            let engine = engine_with("");
            let token = CancellationToken::new();
            token.cancel();
            let (tx, mut rx) = mpsc::channel(4);
            analyze_password_tx(&engine, &secret("password"), None, token, tx).await;

            assert!(rx.recv().await.is_some());
            assert!(rx.recv().await.is_none());
        }
    }
}
