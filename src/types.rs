//! Value types produced by the analysis pipeline.

use std::fmt;

/// Identifier of an attacker profile. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    OnlineThrottled,
    OnlineUnthrottled,
    OfflineArgon2id,
    OfflineScrypt,
    OfflinePbkdf2,
    OfflineSlowHash,
    OfflineFastHash,
    WordlistBasic,
    WordlistRules,
    GpuRulesFastHash,
    GpuRulesSlowHash,
}

impl ScenarioId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnlineThrottled => "online_throttled",
            Self::OnlineUnthrottled => "online_unthrottled",
            Self::OfflineArgon2id => "offline_argon2id",
            Self::OfflineScrypt => "offline_scrypt",
            Self::OfflinePbkdf2 => "offline_pbkdf2",
            Self::OfflineSlowHash => "offline_slow_hash",
            Self::OfflineFastHash => "offline_fast_hash",
            Self::WordlistBasic => "wordlist_basic",
            Self::WordlistRules => "wordlist_rules",
            Self::GpuRulesFastHash => "gpu_rules_fast_hash",
            Self::GpuRulesSlowHash => "gpu_rules_slow_hash",
        }
    }

    /// Smart profiles take their guess count from the heuristic attack
    /// estimators instead of the brute-force count.
    pub fn is_smart(&self) -> bool {
        matches!(
            self,
            Self::WordlistBasic | Self::WordlistRules | Self::GpuRulesFastHash | Self::GpuRulesSlowHash
        )
    }

    pub fn is_wordlist(&self) -> bool {
        matches!(self, Self::WordlistBasic | Self::WordlistRules)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing of one attacker profile against the analysed password.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub id: ScenarioId,
    pub name: String,
    pub guesses_per_second: f64,
    pub expected_time_seconds: f64,
    pub worst_case_time_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Okay,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub fn from_score(score_percent: f64) -> Self {
        if score_percent < 20.0 {
            Self::VeryWeak
        } else if score_percent < 40.0 {
            Self::Weak
        } else if score_percent < 60.0 {
            Self::Okay
        } else if score_percent < 80.0 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very weak",
            Self::Weak => "Weak",
            Self::Okay => "Okay",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    Dictionary,
    Keyboard,
    Sequence,
    Repeat,
    Date,
    Regex,
    Other,
}

impl InsightKind {
    /// Maps a matcher's pattern name onto the closed insight set.
    pub fn from_pattern(pattern: &str) -> Self {
        match pattern.trim().to_ascii_lowercase().as_str() {
            "dictionary" => Self::Dictionary,
            "spatial" | "keyboard" => Self::Keyboard,
            "sequence" => Self::Sequence,
            "repeat" => Self::Repeat,
            "date" => Self::Date,
            "regex" => Self::Regex,
            _ => Self::Other,
        }
    }
}

/// A pattern recognised by the enhancer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Insight {
    pub kind: InsightKind,
    pub label: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingStatus {
    Pass,
    Warn,
    Fail,
}

/// One line of the advisory policy checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyFinding {
    pub id: &'static str,
    pub label: &'static str,
    pub status: FindingStatus,
    pub detail: Option<String>,
}

/// Caller-supplied identity hints. Compared case-insensitively and never
/// retained past the call that receives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordContext {
    pub username: Option<String>,
    pub email: Option<String>,
    pub site: Option<String>,
}

impl PasswordContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Normalised, deduplicated terms: username, site, full email, its local
    /// part and its domain with a common top-level suffix stripped.
    pub fn terms(&self) -> Vec<String> {
        let mut raw: Vec<String> = Vec::new();
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
        };

        if let Some(username) = clean(&self.username) {
            raw.push(username);
        }
        if let Some(site) = clean(&self.site) {
            raw.push(site);
        }
        if let Some(email) = clean(&self.email) {
            let mut parts = email.split('@');
            let local = parts.next().unwrap_or_default().to_string();
            let domain = parts.next().map(strip_common_tld);
            raw.push(email.clone());
            if !local.is_empty() {
                raw.push(local);
            }
            if let Some(domain) = domain.filter(|d| !d.is_empty()) {
                raw.push(domain);
            }
        }

        let mut out: Vec<String> = Vec::new();
        for term in raw {
            let compact: String = term.chars().filter(|c| !c.is_whitespace()).collect();
            if !compact.is_empty() && !out.contains(&compact) {
                out.push(compact);
            }
        }
        out
    }

    /// Terms long enough (3+ characters) that appear inside `password`.
    pub fn matching_terms(&self, password: &str) -> Vec<String> {
        let lower = password.trim().to_lowercase();
        if lower.is_empty() {
            return Vec::new();
        }
        self.terms()
            .into_iter()
            .filter(|t| t.chars().count() >= 3 && lower.contains(t.as_str()))
            .collect()
    }
}

const STRIPPED_TLDS: [&str; 7] = [".com", ".net", ".org", ".io", ".dev", ".app", ".co"];

fn strip_common_tld(domain: &str) -> String {
    for tld in STRIPPED_TLDS {
        if let Some(stem) = domain.strip_suffix(tld) {
            return stem.to_string();
        }
    }
    domain.to_string()
}

/// Breach lookup outcome. `breach_count == 0` means not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreachResult {
    pub breach_count: u64,
}

impl BreachResult {
    pub fn is_breached(&self) -> bool {
        self.breach_count > 0
    }
}

/// Full assessment of one password, recomputed on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub password_length: usize,
    pub charset_size: u32,
    pub entropy_bits: f64,
    pub guesses: f64,
    pub score_percent: f64,
    pub label: StrengthLabel,
    pub scenarios: Vec<ScenarioResult>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub insights: Option<Vec<Insight>>,
    pub policy_findings: Option<Vec<PolicyFinding>>,
}

impl AnalysisResult {
    pub fn scenario(&self, id: ScenarioId) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}

/// Trims, drops blanks and removes duplicates while keeping first-seen order.
pub fn unique_non_blank<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || out.iter().any(|v| v == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}
