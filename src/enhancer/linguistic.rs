//! zxcvbn-backed enhancer.

use super::{Enhancer, EnhancerError, EnhancerReport, PatternMatch};
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, Ordering};
use zxcvbn::matching::patterns::MatchPattern;

const WARM_UP_INPUT: &str = "Tr0ub4dour&3";

/// Runs zxcvbn on the blocking pool so long inputs never stall the runtime.
#[derive(Debug, Default)]
pub struct ZxcvbnEnhancer {
    warmed: AtomicBool,
}

impl ZxcvbnEnhancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_warm(&self) -> bool {
        self.warmed.load(Ordering::SeqCst)
    }
}

impl Enhancer for ZxcvbnEnhancer {
    async fn warm_up(&self) {
        if self.is_warm() {
            return;
        }
        // First call builds the frequency dictionaries.
        match tokio::task::spawn_blocking(|| zxcvbn::zxcvbn(WARM_UP_INPUT, &[]).guesses()).await {
            Ok(_) => {
                self.warmed.store(true, Ordering::SeqCst);
                #[cfg(feature = "tracing")]
                tracing::debug!("zxcvbn dictionaries loaded");
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("zxcvbn warm-up failed: {}", e);
                #[cfg(not(feature = "tracing"))]
                let _ = e;
            }
        }
    }

    async fn evaluate(&self, password: &str) -> Result<EnhancerReport, EnhancerError> {
        let password = SecretString::new(password.to_string().into());
        let report = tokio::task::spawn_blocking(move || report_for(password.expose_secret())).await?;
        self.warmed.store(true, Ordering::SeqCst);
        Ok(report)
    }
}

fn report_for(password: &str) -> EnhancerReport {
    let entropy = zxcvbn::zxcvbn(password, &[]);

    let matches = entropy
        .sequence()
        .iter()
        .map(|m| PatternMatch {
            pattern: pattern_name(&m.pattern).to_string(),
            token: m.token.clone(),
        })
        .collect();

    let (warning, suggestions) = match entropy.feedback() {
        Some(feedback) => (
            feedback.warning().map(|w| w.to_string()),
            feedback.suggestions().iter().map(|s| s.to_string()).collect(),
        ),
        None => (None, Vec::new()),
    };

    EnhancerReport {
        guesses: entropy.guesses() as f64,
        matches,
        warning,
        suggestions,
    }
}

#[allow(unreachable_patterns)]
fn pattern_name(pattern: &MatchPattern) -> &'static str {
    match pattern {
        MatchPattern::Dictionary(_) => "dictionary",
        MatchPattern::Spatial(_) => "spatial",
        MatchPattern::Repeat(_) => "repeat",
        MatchPattern::Sequence(_) => "sequence",
        MatchPattern::Regex(_) => "regex",
        MatchPattern::Date(_) => "date",
        MatchPattern::BruteForce => "bruteforce",
        _ => "other",
    }
}
