use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use referee_watch::analysis::analyze;
use referee_watch::config::AppConfig;
use referee_watch::match_table::static_match_table;
use referee_watch::render::render_console;
use referee_watch::report_export::export_report;
use referee_watch::sofascore_fetch::fetch_match_table;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "referee_watch=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = AppConfig::from_env().context("invalid configuration")?;
    let target_team = flag_value(&args, "--team").unwrap_or_else(|| config.target_team.clone());

    let table = if args.iter().any(|a| a == "--live") {
        let fetched = fetch_match_table(&config.match_ids, &config.scrape);
        if !fetched.errors.is_empty() {
            eprintln!("{} match(es) skipped:", fetched.errors.len());
            for err in &fetched.errors {
                eprintln!("   - {err}");
            }
        }
        fetched.table
    } else {
        static_match_table()?
    };

    let report = analyze(&table, &target_team);
    print!("{}", render_console(&report));

    if let Some(path) = flag_value(&args, "--xlsx").map(PathBuf::from) {
        let summary = export_report(&path, &table, &report)?;
        println!(
            "\nExported {} matches / {} referees to {}",
            summary.matches,
            summary.referees,
            path.display()
        );
    }

    Ok(())
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
