use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Result, anyhow};

pub const DEFAULT_TARGET_TEAM: &str = "Flamengo";
pub const DEFAULT_API_BASE: &str = "https://api.sofascore.com/api/v1";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

// Brasileirao 2024 fixtures that have already been played.
const DEFAULT_MATCH_IDS: &[&str] = &["11880996", "11880988", "11880979", "11881005", "11880990"];

const DEFAULT_PACING_MS: u64 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How an incident is recognised as a VAR review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarRule {
    /// Incident carries `field: true`.
    Flag(String),
    /// Incident's `incidentType` equals the value.
    IncidentType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRules(pub Vec<VarRule>);

impl Default for VarRules {
    fn default() -> Self {
        Self(vec![VarRule::Flag("varReview".to_string())])
    }
}

impl VarRules {
    /// Parse `field:<name>` / `type:<incidentType>` entries separated by commas.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (kind, value) = part
                .split_once(':')
                .ok_or_else(|| anyhow!("var rule {part:?} is missing a ':'"))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(anyhow!("var rule {part:?} has an empty value"));
            }
            let rule = match kind.trim().to_ascii_lowercase().as_str() {
                "field" | "flag" => VarRule::Flag(value.to_string()),
                "type" | "incidenttype" => VarRule::IncidentType(value.to_string()),
                other => return Err(anyhow!("unknown var rule kind {other:?}")),
            };
            rules.push(rule);
        }
        if rules.is_empty() {
            return Err(anyhow!("no var rules given"));
        }
        Ok(Self(rules))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub api_base: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Delay between consecutive match ids.
    pub pacing: Duration,
    pub var_rules: VarRules,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            var_rules: VarRules::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Live,
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub target_team: String,
    pub match_ids: Vec<String>,
    pub source: SourceMode,
    pub bind: SocketAddr,
    pub scrape: ScrapeConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let target_team = get("REFEREE_TARGET_TEAM").unwrap_or_else(|| DEFAULT_TARGET_TEAM.to_string());

        let match_ids = get("REFEREE_MATCH_IDS")
            .map(|raw| parse_match_ids(&raw))
            .unwrap_or_else(|| DEFAULT_MATCH_IDS.iter().map(|s| s.to_string()).collect());

        let source = match get("REFEREE_SOURCE").map(|s| s.to_ascii_lowercase()).as_deref() {
            None | Some("live") => SourceMode::Live,
            Some("static") => SourceMode::Static,
            Some(other) => return Err(anyhow!("REFEREE_SOURCE must be live or static, got {other:?}")),
        };

        let bind_raw = get("REFEREE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| anyhow!("REFEREE_BIND {bind_raw:?}: {err}"))?;

        let pacing_ms = get("REFEREE_PACING_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PACING_MS);
        let timeout_secs = get("REFEREE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let var_rules = match get("REFEREE_VAR_RULE") {
            Some(raw) => VarRules::parse(&raw)?,
            None => VarRules::default(),
        };

        Ok(Self {
            target_team,
            match_ids,
            source,
            bind,
            scrape: ScrapeConfig {
                api_base: get("REFEREE_API_BASE")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                user_agent: get("REFEREE_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                timeout: Duration::from_secs(timeout_secs),
                pacing: Duration::from_millis(pacing_ms),
                var_rules,
            },
        })
    }
}

fn parse_match_ids(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
