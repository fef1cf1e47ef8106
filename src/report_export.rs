use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::analysis::AnalysisReport;
use crate::match_table::{MatchRecord, MatchTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub matches: usize,
    pub referees: usize,
    pub bias_rows: usize,
}

pub fn export_report(path: &Path, table: &MatchTable, report: &AnalysisReport) -> Result<ExportSummary> {
    let mut match_rows = vec![header(&MatchTable::COLUMNS)];
    match_rows.extend(table.iter().map(match_row));

    let mut general_rows = vec![header(&[
        "Referee",
        "Matches",
        "Mean Total Cards",
        "Mean Yellow",
        "Mean Red",
    ])];
    general_rows.extend(report.general.iter().map(|row| {
        vec![
            row.referee.clone(),
            row.matches_officiated.to_string(),
            format!("{:.2}", row.mean_total_cards),
            format!("{:.2}", row.mean_yellow),
            format!("{:.2}", row.mean_red),
        ]
    }));

    let mut var_rows = vec![header(&["Referee", "Matches", "VAR Matches", "VAR Usage %"])];
    var_rows.extend(report.var_frequency.iter().map(|row| {
        vec![
            row.referee.clone(),
            row.matches_officiated.to_string(),
            row.var_matches.to_string(),
            format!("{:.2}", row.var_usage_rate),
        ]
    }));

    let mut bias_rows = vec![header(&[
        "Target Team",
        "Referee",
        "Matches With Team",
        "Mean Total Cards With Team",
    ])];
    bias_rows.extend(report.team_bias.iter().map(|row| {
        vec![
            report.target_team.clone(),
            row.referee.clone(),
            row.matches_with_team.to_string(),
            format!("{:.2}", row.mean_total_cards_with_team),
        ]
    }));

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Matches", &match_rows),
        ("General", &general_rows),
        ("VAR", &var_rows),
        ("Team bias", &bias_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(name)
            .with_context(|| format!("name sheet {name}"))?;
        write_rows(sheet, rows).with_context(|| format!("write sheet {name}"))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportSummary {
        matches: table.len(),
        referees: report.general.len(),
        bias_rows: report.team_bias.len(),
    })
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn match_row(record: &MatchRecord) -> Vec<String> {
    vec![
        record.match_id.clone(),
        record.referee.clone(),
        record.home_team.clone(),
        record.away_team.clone(),
        record.yellow_cards.to_string(),
        record.red_cards.to_string(),
        record.total_cards().to_string(),
        yes_no(record.used_var).to_string(),
        record.complaint_filed.map(yes_no).unwrap_or_default().to_string(),
    ]
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
