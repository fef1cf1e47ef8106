use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tracing::{error, info, warn};

use crate::analysis::analyze;
use crate::config::{AppConfig, ScrapeConfig, SourceMode};
use crate::match_table::{MatchTable, static_match_table};
use crate::render::{render_fragments, render_page};
use crate::sofascore_fetch::fetch_match_table;

/// Where each request gets its match table from.
#[derive(Debug, Clone)]
pub enum MatchSource {
    Static,
    Live {
        match_ids: Vec<String>,
        scrape: ScrapeConfig,
    },
}

impl MatchSource {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.source {
            SourceMode::Static => Self::Static,
            SourceMode::Live => Self::Live {
                match_ids: config.match_ids.clone(),
                scrape: config.scrape.clone(),
            },
        }
    }

    /// Blocking. Never fails: errors leave an empty table behind.
    pub fn load(&self) -> MatchTable {
        match self {
            Self::Static => static_match_table().unwrap_or_else(|err| {
                let detail = format!("{err:#}");
                error!(error = %detail, "embedded dataset failed to parse");
                MatchTable::default()
            }),
            Self::Live { match_ids, scrape } => {
                let fetched = fetch_match_table(match_ids, scrape);
                if fetched.table.is_empty() && !match_ids.is_empty() {
                    warn!(errors = fetched.errors.len(), "no match could be fetched");
                }
                fetched.table
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub source: MatchSource,
    pub target_team: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            source: MatchSource::from_config(config),
            target_team: config.target_team.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(Arc::new(state))
}

/// Fetch, aggregate and render one page.
pub fn build_page(state: &AppState) -> String {
    let table = state.source.load();
    let report = analyze(&table, &state.target_team);
    info!(
        matches = report.matches_analyzed,
        referees = report.general.len(),
        "analysis ready"
    );
    render_page(&render_fragments(&report))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let task_state = Arc::clone(&state);
    match tokio::task::spawn_blocking(move || build_page(&task_state)).await {
        Ok(page) => Html(page),
        Err(err) => {
            error!(error = %err, "page build task failed");
            let empty = analyze(&MatchTable::default(), &state.target_team);
            Html(render_page(&render_fragments(&empty)))
        }
    }
}
