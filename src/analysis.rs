use std::collections::HashMap;

use crate::match_table::{MatchRecord, MatchTable};

#[derive(Debug, Clone, PartialEq)]
pub struct RefereeSummary {
    pub referee: String,
    pub matches_officiated: usize,
    pub mean_total_cards: f64,
    pub mean_yellow: f64,
    pub mean_red: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarFrequencyRow {
    pub referee: String,
    pub matches_officiated: usize,
    pub var_matches: usize,
    /// Percentage in [0, 100].
    pub var_usage_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamBiasSummary {
    pub referee: String,
    pub matches_with_team: usize,
    pub mean_total_cards_with_team: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub target_team: String,
    pub matches_analyzed: usize,
    pub general: Vec<RefereeSummary>,
    pub var_frequency: Vec<VarFrequencyRow>,
    pub team_bias: Vec<TeamBiasSummary>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.matches_analyzed == 0
    }
}

pub fn analyze(table: &MatchTable, target_team: &str) -> AnalysisReport {
    AnalysisReport {
        target_team: target_team.to_string(),
        matches_analyzed: table.len(),
        general: general_stats(table),
        var_frequency: var_frequency(table),
        team_bias: team_bias(table, target_team),
    }
}

/// Per-referee card means, most cards first.
pub fn general_stats(table: &MatchTable) -> Vec<RefereeSummary> {
    let mut rows: Vec<RefereeSummary> = group_by_referee(table.iter())
        .into_iter()
        .map(|acc| RefereeSummary {
            matches_officiated: acc.matches,
            mean_total_cards: acc.mean(acc.total_cards),
            mean_yellow: acc.mean(acc.yellow_cards),
            mean_red: acc.mean(acc.red_cards),
            referee: acc.referee,
        })
        .collect();
    rows.sort_by(|a, b| b.mean_total_cards.total_cmp(&a.mean_total_cards));
    rows
}

pub fn var_frequency(table: &MatchTable) -> Vec<VarFrequencyRow> {
    let mut rows: Vec<VarFrequencyRow> = group_by_referee(table.iter())
        .into_iter()
        .map(|acc| VarFrequencyRow {
            matches_officiated: acc.matches,
            var_matches: acc.var_matches,
            var_usage_rate: acc.var_rate(),
            referee: acc.referee,
        })
        .collect();
    rows.sort_by(|a, b| b.var_usage_rate.total_cmp(&a.var_usage_rate));
    rows
}

/// Card means restricted to matches where `target_team` played home or away.
/// Empty when the team is not in the table at all.
pub fn team_bias(table: &MatchTable, target_team: &str) -> Vec<TeamBiasSummary> {
    let mut rows: Vec<TeamBiasSummary> =
        group_by_referee(table.iter().filter(|m| m.involves(target_team)))
            .into_iter()
            .map(|acc| TeamBiasSummary {
                matches_with_team: acc.matches,
                mean_total_cards_with_team: acc.mean(acc.total_cards),
                referee: acc.referee,
            })
            .collect();
    rows.sort_by(|a, b| {
        b.mean_total_cards_with_team
            .total_cmp(&a.mean_total_cards_with_team)
    });
    rows
}

#[derive(Debug, Clone, Default)]
struct RefereeAcc {
    referee: String,
    matches: usize,
    yellow_cards: u64,
    red_cards: u64,
    total_cards: u64,
    var_matches: usize,
}

impl RefereeAcc {
    fn push(&mut self, record: &MatchRecord) {
        self.matches += 1;
        self.yellow_cards += u64::from(record.yellow_cards);
        self.red_cards += u64::from(record.red_cards);
        self.total_cards += record.total_cards();
        if record.used_var {
            self.var_matches += 1;
        }
    }

    // Accumulators only exist once a record was pushed, so `matches >= 1`.
    fn mean(&self, sum: u64) -> f64 {
        sum as f64 / self.matches as f64
    }

    fn var_rate(&self) -> f64 {
        if self.var_matches == 0 {
            return 0.0;
        }
        self.var_matches as f64 / self.matches as f64 * 100.0
    }
}

/// Accumulators in first-encounter order so later stable sorts keep that order on ties.
fn group_by_referee<'a>(records: impl Iterator<Item = &'a MatchRecord>) -> Vec<RefereeAcc> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<RefereeAcc> = Vec::new();

    for record in records {
        let slot = *index.entry(record.referee.as_str()).or_insert_with(|| {
            groups.push(RefereeAcc {
                referee: record.referee.clone(),
                ..RefereeAcc::default()
            });
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    groups
}
