//! Optional pattern-matching pass that refines a base analysis.
//!
//! The base analysis is always available on its own. An [`Enhancer`] may
//! replace its guess count with a better estimate and add warnings,
//! suggestions and recognised patterns. Score, label and scenarios are left
//! as computed by the base pass.

#[cfg(feature = "zxcvbn")]
mod linguistic;

#[cfg(feature = "zxcvbn")]
pub use linguistic::ZxcvbnEnhancer;

use crate::math;
use crate::types::{unique_non_blank, AnalysisResult, Insight, InsightKind};
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

const MAX_INSIGHTS: usize = 6;
const INSIGHT_DETAIL: &str = "Detected by pattern matcher.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnhancerReport {
    pub guesses: f64,
    pub matches: Vec<PatternMatch>,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

#[derive(Error, Debug)]
pub enum EnhancerError {
    #[error("Enhancer unavailable: {0}")]
    Unavailable(String),
    #[error("Enhancer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub trait Enhancer: Send + Sync {
    /// Preloads whatever the enhancer needs. Safe to call more than once.
    fn warm_up(&self) -> impl Future<Output = ()> + Send;

    fn evaluate(&self, password: &str) -> impl Future<Output = Result<EnhancerReport, EnhancerError>> + Send;
}

/// Enhancer that never has anything to add; analyses pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnhancer;

impl Enhancer for NoopEnhancer {
    async fn warm_up(&self) {}

    async fn evaluate(&self, _password: &str) -> Result<EnhancerReport, EnhancerError> {
        Err(EnhancerError::Unavailable("no enhancer configured".to_string()))
    }
}

/// Runs `enhancer` over `password` and folds its report into `base`.
///
/// The password is trimmed first. Returns `base` untouched when nothing is
/// left after trimming, when `token` is cancelled before the report is
/// merged, or when the enhancer fails.
pub async fn enhance<E: Enhancer>(
    enhancer: &E,
    password: &SecretString,
    base: AnalysisResult,
    token: Option<&CancellationToken>,
) -> AnalysisResult {
    let pwd = password.expose_secret().trim();
    if pwd.is_empty() || token.is_some_and(CancellationToken::is_cancelled) {
        return base;
    }

    let report = match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => return base,
            report = enhancer.evaluate(pwd) => report,
        },
        None => enhancer.evaluate(pwd).await,
    };

    if token.is_some_and(CancellationToken::is_cancelled) {
        return base;
    }

    match report {
        Ok(report) => merge_report(base, report),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Enhancement skipped: {}", e);
            #[cfg(not(feature = "tracing"))]
            let _ = e;
            base
        }
    }
}

/// Folds an enhancer report into a base analysis.
///
/// Negative guesses clamp to zero. A NaN or infinite guess count means the
/// report is unusable and `base` is returned as is.
pub fn merge_report(base: AnalysisResult, report: EnhancerReport) -> AnalysisResult {
    if !report.guesses.is_finite() {
        return base;
    }
    let guesses = report.guesses.max(0.0);

    let warnings = unique_non_blank(base.warnings.iter().map(String::as_str).chain(report.warning.as_deref()));
    let suggestions = unique_non_blank(
        base.suggestions
            .iter()
            .chain(report.suggestions.iter())
            .map(String::as_str),
    );

    let mut insights = base.insights.clone().unwrap_or_default();
    for found in report.matches.iter().take(MAX_INSIGHTS).map(insight_for) {
        if !insights.contains(&found) {
            insights.push(found);
        }
    }

    AnalysisResult {
        guesses,
        entropy_bits: if guesses > 0.0 { math::log2(guesses).max(0.0) } else { 0.0 },
        warnings,
        suggestions,
        insights: if insights.is_empty() { None } else { Some(insights) },
        ..base
    }
}

fn insight_for(found: &PatternMatch) -> Insight {
    let token = found.token.trim();
    let label = if token.is_empty() {
        found.pattern.clone()
    } else {
        format!("{}: \"{}\"", found.pattern, token)
    };
    Insight {
        kind: InsightKind::from_pattern(&found.pattern),
        label,
        detail: Some(INSIGHT_DETAIL.to_string()),
    }
}
