use std::fmt::Write as _;

use chrono::Utc;

use crate::analysis::{AnalysisReport, RefereeSummary, TeamBiasSummary, VarFrequencyRow};

pub const NO_DATA_HTML: &str = "<p>No match data found.</p>";
pub const NO_DATA_TEXT: &str = "No match data found.";
pub const NO_TARGET_LABEL: &str = "N/A";

const TABLE_CLASS: &str = "table table-striped";

const GENERAL_HEADERS: [&str; 5] = [
    "Referee",
    "Matches",
    "Mean total cards",
    "Mean yellow",
    "Mean red",
];
const VAR_HEADERS: [&str; 4] = ["Referee", "Matches", "VAR matches", "VAR usage (%)"];
const BIAS_HEADERS: [&str; 3] = ["Referee", "Matches with team", "Mean total cards with team"];

/// The pieces the page template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFragments {
    pub general_html: String,
    pub var_html: String,
    pub bias_html: String,
    pub target_label: String,
}

pub fn render_fragments(report: &AnalysisReport) -> PageFragments {
    if report.is_empty() {
        return PageFragments {
            general_html: NO_DATA_HTML.to_string(),
            var_html: NO_DATA_HTML.to_string(),
            bias_html: NO_DATA_HTML.to_string(),
            target_label: NO_TARGET_LABEL.to_string(),
        };
    }
    PageFragments {
        general_html: general_stats_html(&report.general),
        var_html: var_frequency_html(&report.var_frequency),
        bias_html: team_bias_html(&report.team_bias),
        target_label: report.target_team.clone(),
    }
}

pub fn render_page(fragments: &PageFragments) -> String {
    let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let target = escape_html(&fragments.target_label);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Referee analysis</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; margin-bottom: 2rem; }}
    th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }}
    tbody tr:nth-child(odd) {{ background: #f4f4f4; }}
  </style>
</head>
<body>
  <h1>Referee analysis</h1>
  <h2>Cards per referee</h2>
  {general}
  <h2>VAR usage</h2>
  {var}
  <h2>Cards in matches with {target}</h2>
  {bias}
  <footer><small>Generated {generated}</small></footer>
</body>
</html>
"#,
        general = fragments.general_html,
        var = fragments.var_html,
        bias = fragments.bias_html,
    )
}

pub fn general_stats_html(rows: &[RefereeSummary]) -> String {
    let body: Vec<Vec<String>> = rows.iter().map(general_cells).collect();
    html_table(&GENERAL_HEADERS, &body)
}

pub fn var_frequency_html(rows: &[VarFrequencyRow]) -> String {
    let body: Vec<Vec<String>> = rows.iter().map(var_cells).collect();
    html_table(&VAR_HEADERS, &body)
}

pub fn team_bias_html(rows: &[TeamBiasSummary]) -> String {
    let body: Vec<Vec<String>> = rows.iter().map(bias_cells).collect();
    html_table(&BIAS_HEADERS, &body)
}

pub fn render_console(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    let _ = writeln!(out, "{rule}\n  Cards per referee\n{rule}");
    if report.is_empty() {
        let _ = writeln!(out, "{NO_DATA_TEXT}");
        let _ = writeln!(out, "\n{rule}\n  VAR usage (%)\n{rule}");
        let _ = writeln!(out, "{NO_DATA_TEXT}");
        let _ = writeln!(out, "\n{rule}\n  Cards in matches with {NO_TARGET_LABEL}\n{rule}");
        let _ = writeln!(out, "{NO_DATA_TEXT}");
        return out;
    }

    let general: Vec<Vec<String>> = report.general.iter().map(general_cells).collect();
    out.push_str(&text_table(&GENERAL_HEADERS, &general));

    let _ = writeln!(out, "\n{rule}\n  VAR usage (%)\n{rule}");
    let var: Vec<Vec<String>> = report.var_frequency.iter().map(var_cells).collect();
    out.push_str(&text_table(&VAR_HEADERS, &var));

    let _ = writeln!(
        out,
        "\n{rule}\n  Cards in matches with {}\n{rule}",
        report.target_team
    );
    if report.team_bias.is_empty() {
        let _ = writeln!(out, "{} does not appear in this dataset.", report.target_team);
    } else {
        let bias: Vec<Vec<String>> = report.team_bias.iter().map(bias_cells).collect();
        out.push_str(&text_table(&BIAS_HEADERS, &bias));
    }
    out
}

fn general_cells(row: &RefereeSummary) -> Vec<String> {
    vec![
        row.referee.clone(),
        row.matches_officiated.to_string(),
        row.mean_total_cards.to_string(),
        row.mean_yellow.to_string(),
        row.mean_red.to_string(),
    ]
}

fn var_cells(row: &VarFrequencyRow) -> Vec<String> {
    vec![
        row.referee.clone(),
        row.matches_officiated.to_string(),
        row.var_matches.to_string(),
        format!("{:.2}", row.var_usage_rate),
    ]
}

fn bias_cells(row: &TeamBiasSummary) -> Vec<String> {
    vec![
        row.referee.clone(),
        row.matches_with_team.to_string(),
        row.mean_total_cards_with_team.to_string(),
    ]
}

fn html_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<table class=\"{TABLE_CLASS}\">");
    out.push_str("  <thead>\n    <tr>");
    for header in headers {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for row in rows {
        out.push_str("    <tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape_html(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("  </tbody>\n</table>");
    out
}

fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_text_row(&mut out, &header_cells, &widths);
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(total));
    for row in rows {
        push_text_row(&mut out, row, &widths);
    }
    out
}

fn push_text_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (cell, &width))| {
            if idx == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
