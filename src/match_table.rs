use anyhow::{Context, Result, anyhow};

/// Referee name used when the provider does not report one.
pub const UNAVAILABLE_REFEREE: &str = "unavailable";

const STATIC_DATASET: &str = "\
matchId,referee,homeTeam,awayTeam,yellowCards,redCards,usedVar,complaintFiled
1001,Sandro Ricci,Flamengo,Vasco,6,1,yes,yes
1002,Wilton Pereira Sampaio,Palmeiras,Corinthians,3,0,no,no
1003,Sandro Ricci,Sao Paulo,Santos,7,0,no,yes
1004,Anderson Daronco,Gremio,Internacional,2,0,no,no
1005,Wilton Pereira Sampaio,Atletico-MG,Cruzeiro,5,1,yes,no
1006,Sandro Ricci,Vasco,Botafogo,4,0,yes,no
1007,Anderson Daronco,Fluminense,Bahia,6,1,yes,yes
1008,Wilton Pereira Sampaio,Coritiba,Goias,1,0,no,no
1009,Anderson Daronco,Cuiaba,Fortaleza,8,0,yes,yes
1010,Sandro Ricci,Atletico-PR,America-MG,3,0,no,no
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub match_id: String,
    pub referee: String,
    pub home_team: String,
    pub away_team: String,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub used_var: bool,
    pub complaint_filed: Option<bool>,
}

impl MatchRecord {
    pub fn total_cards(&self) -> u64 {
        u64::from(self.yellow_cards) + u64::from(self.red_cards)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTable {
    pub rows: Vec<MatchRecord>,
}

impl MatchTable {
    pub const COLUMNS: [&'static str; 9] = [
        "Match ID",
        "Referee",
        "Home",
        "Away",
        "Yellow",
        "Red",
        "Total",
        "VAR",
        "Complaint",
    ];

    pub fn new(rows: Vec<MatchRecord>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> {
        self.rows.iter()
    }
}

pub fn static_match_table() -> Result<MatchTable> {
    parse_static_table(STATIC_DATASET).context("embedded dataset")
}

/// Parse the comma separated offline format. The first non-blank line is the header.
pub fn parse_static_table(raw: &str) -> Result<MatchTable> {
    let mut rows = Vec::new();
    let mut seen_header = false;

    for (idx, line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !seen_header {
            seen_header = true;
            continue;
        }
        let row = parse_static_row(line).with_context(|| format!("line {line_no}"))?;
        rows.push(row);
    }

    Ok(MatchTable::new(rows))
}

fn parse_static_row(line: &str) -> Result<MatchRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 8 {
        return Err(anyhow!("expected 8 columns, found {}", fields.len()));
    }

    let yellow_cards = fields[4]
        .parse::<u32>()
        .with_context(|| format!("yellowCards is not an integer: {:?}", fields[4]))?;
    let red_cards = fields[5]
        .parse::<u32>()
        .with_context(|| format!("redCards is not an integer: {:?}", fields[5]))?;

    Ok(MatchRecord {
        match_id: fields[0].to_string(),
        referee: non_empty(fields[1]).unwrap_or(UNAVAILABLE_REFEREE).to_string(),
        home_team: fields[2].to_string(),
        away_team: fields[3].to_string(),
        yellow_cards,
        red_cards,
        used_var: parse_yes_no(fields[6]).context("usedVar")?,
        complaint_filed: Some(parse_yes_no(fields[7]).context("complaintFiled")?),
    })
}

fn parse_yes_no(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "sim" => Ok(true),
        "no" | "n" | "nao" | "não" => Ok(false),
        other => Err(anyhow!("expected yes/no, found {other:?}")),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
