use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use referee_watch::analysis::analyze;
use referee_watch::config::VarRules;
use referee_watch::match_table::{MatchRecord, MatchTable};
use referee_watch::render::{render_console, render_fragments, render_page};
use referee_watch::sofascore_fetch::{parse_event_json, parse_incidents_json, tally_incidents};

const REFEREES: &[&str] = &[
    "Sandro Ricci",
    "Wilton Pereira Sampaio",
    "Anderson Daronco",
    "Raphael Claus",
    "Bruno Arleu de Araujo",
];

const TEAMS: &[&str] = &[
    "Flamengo",
    "Vasco",
    "Palmeiras",
    "Corinthians",
    "Gremio",
    "Internacional",
    "Bahia",
    "Fluminense",
];

fn sample_table(rows: usize) -> MatchTable {
    MatchTable::new(
        (0..rows)
            .map(|idx| MatchRecord {
                match_id: (1000 + idx).to_string(),
                referee: REFEREES[idx % REFEREES.len()].to_string(),
                home_team: TEAMS[idx % TEAMS.len()].to_string(),
                away_team: TEAMS[(idx * 3 + 1) % TEAMS.len()].to_string(),
                yellow_cards: (idx % 9) as u32,
                red_cards: u32::from(idx % 7 == 0),
                used_var: idx % 3 == 0,
                complaint_filed: None,
            })
            .collect(),
    )
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("event_parse", |b| {
        b.iter(|| {
            let info = parse_event_json(black_box(EVENT_JSON)).unwrap();
            black_box(info.referee.len());
        })
    });

    let rules = VarRules::default();
    c.bench_function("incidents_tally", |b| {
        b.iter(|| {
            let incidents = parse_incidents_json(black_box(INCIDENTS_JSON)).unwrap();
            black_box(tally_incidents(&incidents, &rules));
        })
    });
}

fn bench_analysis(c: &mut Criterion) {
    let table = sample_table(500);
    c.bench_function("analyze_500", |b| {
        b.iter(|| {
            let report = analyze(black_box(&table), "Flamengo");
            black_box(report.general.len());
        })
    });

    let report = analyze(&table, "Flamengo");
    c.bench_function("render_page_500", |b| {
        b.iter(|| {
            let page = render_page(&render_fragments(black_box(&report)));
            black_box(page.len());
        })
    });
    c.bench_function("render_console_500", |b| {
        b.iter(|| black_box(render_console(black_box(&report)).len()))
    });
}

criterion_group!(benches, bench_parse, bench_analysis);
criterion_main!(benches);

const EVENT_JSON: &str = r#"{"event":{"id":1,"referee":{"name":"Sandro Ricci"},"homeTeam":{"name":"Flamengo"},"awayTeam":{"name":"Vasco"}}}"#;

const INCIDENTS_JSON: &str = r#"{"incidents":[
{"incidentType":"card","color":"yellow","time":12},
{"incidentType":"goal","time":30,"varReview":true},
{"incidentType":"card","color":"red","time":55},
{"incidentType":"card","color":"yellow","time":71},
{"incidentType":"substitution","time":80}
]}"#;
