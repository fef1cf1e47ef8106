use std::thread;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ScrapeConfig, VarRule, VarRules};
use crate::http_client::{fetch_json, http_client};
use crate::match_table::{MatchRecord, MatchTable, UNAVAILABLE_REFEREE};

#[derive(Debug, Clone)]
pub struct LiveFetch {
    pub table: MatchTable,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInfo {
    pub referee: String,
    pub home_team: String,
    pub away_team: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentTally {
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub var_reviews: u32,
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    event: EventPayload,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    referee: Option<NamedRef>,
    #[serde(rename = "homeTeam")]
    home_team: NamedRef,
    #[serde(rename = "awayTeam")]
    away_team: NamedRef,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    #[serde(default)]
    name: Option<String>,
}

/// Fetch every id in order, pausing between ids. Ids that fail are logged and skipped.
pub fn fetch_match_table(match_ids: &[String], config: &ScrapeConfig) -> LiveFetch {
    let mut errors = Vec::new();
    let client = match http_client(config) {
        Ok(client) => client,
        Err(err) => {
            let detail = format!("{err:#}");
            warn!(error = %detail, "http client build failed");
            errors.push(format!("http client build failed: {detail}"));
            return LiveFetch {
                table: MatchTable::default(),
                errors,
            };
        }
    };

    info!(count = match_ids.len(), base = %config.api_base, "fetching matches");
    let mut rows = Vec::new();
    for (idx, match_id) in match_ids.iter().enumerate() {
        if idx > 0 && !config.pacing.is_zero() {
            thread::sleep(config.pacing);
        }
        match fetch_match_record(&client, config, match_id) {
            Ok(record) => {
                debug!(
                    match_id = %record.match_id,
                    home = %record.home_team,
                    away = %record.away_team,
                    "match fetched"
                );
                rows.push(record);
            }
            Err(err) => {
                let detail = format!("{err:#}");
                warn!(match_id = %match_id, error = %detail, "match fetch failed");
                errors.push(format!("match {match_id}: {detail}"));
            }
        }
    }

    info!(fetched = rows.len(), failed = errors.len(), "match fetch finished");
    LiveFetch {
        table: MatchTable::new(rows),
        errors,
    }
}

pub fn fetch_match_record(client: &Client, config: &ScrapeConfig, match_id: &str) -> Result<MatchRecord> {
    let base = config.api_base.trim_end_matches('/');

    let event_url = format!("{base}/event/{match_id}");
    let event_body = fetch_json(client, &event_url).context("event request failed")?;
    let event = parse_event_json(&event_body)?;

    let incidents_url = format!("{base}/event/{match_id}/incidents");
    let incidents_body = fetch_json(client, &incidents_url).context("incidents request failed")?;
    let incidents = parse_incidents_json(&incidents_body)?;
    let tally = tally_incidents(&incidents, &config.var_rules);

    Ok(MatchRecord {
        match_id: match_id.to_string(),
        referee: event.referee,
        home_team: event.home_team,
        away_team: event.away_team,
        yellow_cards: tally.yellow_cards,
        red_cards: tally.red_cards,
        used_var: tally.var_reviews > 0,
        complaint_filed: None,
    })
}

pub fn parse_event_json(raw: &str) -> Result<EventInfo> {
    let resp: EventResponse = serde_json::from_str(raw.trim()).context("invalid event json")?;
    let event = resp.event;

    let referee = event
        .referee
        .and_then(|r| r.name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNAVAILABLE_REFEREE.to_string());
    let home_team = event
        .home_team
        .name
        .ok_or_else(|| anyhow!("event is missing homeTeam.name"))?;
    let away_team = event
        .away_team
        .name
        .ok_or_else(|| anyhow!("event is missing awayTeam.name"))?;

    Ok(EventInfo {
        referee,
        home_team,
        away_team,
    })
}

/// A body without an `incidents` key is an error so the match is skipped
/// instead of counted with zero cards. An explicit `null` list is empty.
pub fn parse_incidents_json(raw: &str) -> Result<Vec<Value>> {
    let root: Value = serde_json::from_str(raw.trim()).context("invalid incidents json")?;
    match root.get("incidents") {
        None => Err(anyhow!("incidents response has no incidents field")),
        Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(anyhow!("incidents is not an array")),
    }
}

/// Count cards by colour and VAR reviews per the configured rules.
/// Colours other than `yellow` and `red` are not counted.
pub fn tally_incidents(incidents: &[Value], rules: &VarRules) -> IncidentTally {
    let mut tally = IncidentTally::default();
    for incident in incidents {
        let kind = incident.get("incidentType").and_then(Value::as_str);
        if kind == Some("card") {
            match incident.get("color").and_then(Value::as_str) {
                Some("yellow") => tally.yellow_cards += 1,
                Some("red") => tally.red_cards += 1,
                _ => {}
            }
        }
        if is_var_review(incident, rules) {
            tally.var_reviews += 1;
        }
    }
    tally
}

fn is_var_review(incident: &Value, rules: &VarRules) -> bool {
    rules.0.iter().any(|rule| match rule {
        VarRule::Flag(field) => incident.get(field.as_str()).and_then(Value::as_bool) == Some(true),
        VarRule::IncidentType(kind) => {
            incident.get("incidentType").and_then(Value::as_str) == Some(kind.as_str())
        }
    })
}
