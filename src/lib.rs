//! Password strength analysis library
//!
//! This library estimates how hard a password is to guess, models how long
//! realistic attackers would need, explains the result and checks the
//! password against a breach corpus without ever sending it.
//!
//! # Features
//!
//! - `async` (default): Enhancement, breach lookups and cancellation support
//! - `http` (default): Range lookups over HTTP via `reqwest`
//! - `zxcvbn` (default): Pattern-matching enhancer backed by `zxcvbn`
//! - `tracing` (default): Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_ANALYZER_COMMON_PASSWORDS`: Extra newline-delimited common passwords
//! - `PWD_ANALYZER_RANGE_URL`: Range lookup base URL
//!   (default: `https://api.pwnedpasswords.com`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_analyzer::{analyze_password, format_duration, ScenarioId};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = analyze_password(&password, None);
//!
//! println!("Score: {:.0}% ({})", result.score_percent, result.label);
//! if let Some(fast) = result.scenario(ScenarioId::OfflineFastHash) {
//!     println!("Offline fast hash: {}", format_duration(fast.expected_time_seconds));
//! }
//! ```
//!
//! With the default features the asynchronous engine adds enhancement and
//! breach lookups:
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "http", feature = "zxcvbn"))]
//! # async fn run() -> Result<(), pwd_analyzer::BreachError> {
//! use pwd_analyzer::{BreachConfig, PasswordAnalyzer, PasswordEngine};
//! use secrecy::SecretString;
//!
//! let engine = PasswordEngine::with_config(PasswordAnalyzer::default(), &BreachConfig::from_env())?;
//! engine.warm_up().await;
//!
//! let password = SecretString::new("hunter2".to_string().into());
//! let base = engine.analyze(&password, None);
//! let refined = engine.enhance(&password, base, None).await;
//! let breach = engine.check_breach(&password, None).await?;
//! println!("{} bits, seen {:?} times", refined.entropy_bits, breach.map(|b| b.breach_count));
//! # Ok(())
//! # }
//! ```

mod corpus;
mod evaluator;
mod format;
mod math;
mod types;

pub mod breach;
pub mod estimate;
pub mod score;
pub mod sections;
pub mod suggest;

#[cfg(feature = "async")]
pub mod enhancer;

// Public API
pub use breach::{parse_range_response, sha1_hex_upper, BreachConfig, BreachError, RangeClient, RangeKey};
pub use corpus::{common_passwords_path, Corpus, CorpusError, COMMON_PASSWORDS_ENV};
pub use estimate::{default_profiles, AttackProfile, CrackTimeEstimator, ScenarioView};
pub use evaluator::{analyze_password, PasswordAnalyzer};
pub use format::format_duration;
pub use score::{explain_crack_time, explain_score, CrackTimeExplanation, ScoreExplanation};
pub use suggest::SuggestionEngine;
pub use types::{
    AnalysisResult, BreachResult, FindingStatus, Insight, InsightKind, PasswordContext, PolicyFinding, ScenarioId,
    ScenarioResult, StrengthLabel,
};

#[cfg(feature = "async")]
pub use breach::{BreachChecker, BreachStatus, BreachWatcher, RangeCache};
#[cfg(feature = "http")]
pub use breach::HttpRangeClient;
#[cfg(feature = "async")]
pub use enhancer::{Enhancer, EnhancerError, EnhancerReport, NoopEnhancer, PatternMatch};
#[cfg(feature = "zxcvbn")]
pub use enhancer::ZxcvbnEnhancer;
#[cfg(feature = "async")]
pub use evaluator::{analyze_password_tx, PasswordEngine};
