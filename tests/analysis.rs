use std::collections::{HashMap, HashSet};

use referee_watch::analysis::{analyze, general_stats, team_bias, var_frequency};
use referee_watch::match_table::{MatchRecord, MatchTable, static_match_table};

fn record(id: &str, referee: &str, home: &str, away: &str, yellow: u32, red: u32, var: bool) -> MatchRecord {
    MatchRecord {
        match_id: id.to_string(),
        referee: referee.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        yellow_cards: yellow,
        red_cards: red,
        used_var: var,
        complaint_filed: None,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[test]
fn general_stats_on_static_dataset() {
    let table = static_match_table().expect("embedded dataset should parse");
    let general = general_stats(&table);

    let ricci = general
        .iter()
        .find(|r| r.referee == "Sandro Ricci")
        .expect("Sandro Ricci should be present");
    assert_eq!(ricci.matches_officiated, 4);
    // Totals 7, 7, 4, 3.
    assert_close(ricci.mean_total_cards, 5.25);
    assert_close(ricci.mean_yellow, 5.0);
    assert_close(ricci.mean_red, 0.25);

    // Daronco 17/3, Ricci 21/4, Sampaio 10/3.
    let order: Vec<&str> = general.iter().map(|r| r.referee.as_str()).collect();
    assert_eq!(
        order,
        vec!["Anderson Daronco", "Sandro Ricci", "Wilton Pereira Sampaio"]
    );
    for pair in general.windows(2) {
        assert!(pair[0].mean_total_cards >= pair[1].mean_total_cards);
    }
}

#[test]
fn one_row_per_distinct_referee() {
    let table = static_match_table().expect("embedded dataset should parse");
    let distinct: HashSet<&str> = table.iter().map(|r| r.referee.as_str()).collect();
    assert_eq!(general_stats(&table).len(), distinct.len());
    assert_eq!(var_frequency(&table).len(), distinct.len());
}

#[test]
fn var_rate_uses_left_join_semantics() {
    let table = MatchTable::new(vec![
        record("1", "Never", "A", "B", 1, 0, false),
        record("2", "Never", "C", "D", 2, 0, false),
        record("3", "Sometimes", "A", "C", 3, 0, true),
        record("4", "Sometimes", "B", "D", 3, 0, false),
        record("5", "Sometimes", "B", "C", 3, 0, false),
        record("6", "Always", "A", "D", 0, 0, true),
    ]);
    let rows = var_frequency(&table);
    let by_name: HashMap<&str, _> = rows.iter().map(|r| (r.referee.as_str(), r)).collect();

    let never = by_name["Never"];
    assert_eq!(never.var_matches, 0);
    assert_eq!(never.var_usage_rate, 0.0);

    let sometimes = by_name["Sometimes"];
    assert_eq!(sometimes.var_matches, 1);
    assert_close(sometimes.var_usage_rate, 100.0 / 3.0);

    assert_close(by_name["Always"].var_usage_rate, 100.0);

    assert_eq!(rows[0].referee, "Always");
    assert_eq!(rows[2].referee, "Never");
    for row in &rows {
        assert!((0.0..=100.0).contains(&row.var_usage_rate));
    }
}

#[test]
fn var_frequency_on_static_dataset() {
    let table = static_match_table().expect("embedded dataset should parse");
    let rows = var_frequency(&table);
    assert_eq!(rows[0].referee, "Anderson Daronco");
    assert_close(rows[0].var_usage_rate, 200.0 / 3.0);
    let ricci = rows.iter().find(|r| r.referee == "Sandro Ricci").expect("present");
    assert_eq!(ricci.var_matches, 2);
    assert_close(ricci.var_usage_rate, 50.0);
}

#[test]
fn team_bias_single_flamengo_match() {
    let table = static_match_table().expect("embedded dataset should parse");
    let bias = team_bias(&table, "Flamengo");
    assert_eq!(bias.len(), 1);
    assert_eq!(bias[0].referee, "Sandro Ricci");
    assert_eq!(bias[0].matches_with_team, 1);
    assert_close(bias[0].mean_total_cards_with_team, 7.0);
}

#[test]
fn team_bias_matches_away_side_too() {
    let table = static_match_table().expect("embedded dataset should parse");
    let bias = team_bias(&table, "Vasco");
    assert_eq!(bias.len(), 1);
    assert_eq!(bias[0].matches_with_team, 2);
    assert_close(bias[0].mean_total_cards_with_team, 5.5);
}

#[test]
fn team_bias_is_empty_for_absent_team() {
    let table = static_match_table().expect("embedded dataset should parse");
    assert!(team_bias(&table, "Real Madrid").is_empty());
}

#[test]
fn team_bias_counts_never_exceed_overall() {
    let table = static_match_table().expect("embedded dataset should parse");
    let general = general_stats(&table);
    let overall: HashMap<&str, usize> = general
        .iter()
        .map(|r| (r.referee.as_str(), r.matches_officiated))
        .collect();
    let teams: HashSet<&str> = table
        .iter()
        .flat_map(|r| [r.home_team.as_str(), r.away_team.as_str()])
        .collect();
    for team in teams {
        for row in team_bias(&table, team) {
            assert!(row.matches_with_team >= 1);
            assert!(row.matches_with_team <= overall[row.referee.as_str()]);
        }
    }
}

#[test]
fn max_card_counts_do_not_overflow() {
    let table = MatchTable::new(vec![
        record("1", "Heavy", "A", "B", u32::MAX, 1, false),
        record("2", "Heavy", "C", "D", u32::MAX, u32::MAX, true),
    ]);
    let report = analyze(&table, "A");
    assert_eq!(report.general.len(), 1);
    assert_close(report.general[0].mean_total_cards, (3.0 * u32::MAX as f64 + 1.0) / 2.0);
    assert_close(report.var_frequency[0].var_usage_rate, 50.0);
    assert_close(report.team_bias[0].mean_total_cards_with_team, u32::MAX as f64 + 1.0);
}

#[test]
fn empty_table_gives_empty_views() {
    let report = analyze(&MatchTable::default(), "Flamengo");
    assert!(report.is_empty());
    assert!(report.general.is_empty());
    assert!(report.var_frequency.is_empty());
    assert!(report.team_bias.is_empty());
    assert_eq!(report.target_team, "Flamengo");
}
