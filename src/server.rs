//! HTTP surface: builder data, cards and share links as JSON.
//!
//! Every endpoint that takes a selection reads it from the raw query string,
//! exactly as a share link carries it.

use crate::card::{build_card_sections, unmatched_ids, CardSection};
use crate::config::Config;
use crate::content::{Category, ContentStore, LanguageSummary, OptionEntry};
use crate::i18n::Language;
use crate::metrics::{CardMetrics, MetricsReport};
use crate::routes::AppRoute;
use crate::selection::SelectionState;
use anyhow::{Context, Result};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use url::form_urlencoded;

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub default_source: Language,
    pub metrics: Arc<CardMetrics>,
}

impl AppState {
    pub fn new(content: ContentStore, default_source: Language) -> Self {
        Self {
            content: Arc::new(content),
            default_source,
            metrics: Arc::new(CardMetrics::new()),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct MakerOption {
    id: i64,
    label: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct MakerCategory {
    key: Category,
    label: String,
    options: Vec<MakerOption>,
}

#[derive(Debug, Serialize)]
struct MakerResponse {
    language: Language,
    languages: Vec<LanguageSummary>,
    selection: SelectionState,
    categories: Vec<MakerCategory>,
}

#[derive(Debug, Serialize)]
struct CardResponse {
    target: Option<Language>,
    sections: Vec<CardSection>,
}

#[derive(Debug, Serialize)]
struct ShareResponse {
    view: AppRoute,
    query: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    view: AppRoute,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(languages))
        .route("/api/maker", get(maker))
        .route("/api/card", get(card))
        .route("/api/share", get(share))
        .route("/api/route", get(route))
        .route("/api/metrics", get(metrics))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, router(state))
        .await
        .context("HTTP server failed")
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn languages() -> Json<Vec<LanguageSummary>> {
    Json(ContentStore::language_options())
}

async fn maker(State(state): State<AppState>, RawQuery(query): RawQuery) -> Json<MakerResponse> {
    let selection = SelectionState::from_query(query.as_deref().unwrap_or_default());
    let language = selection.source_language.unwrap_or(state.default_source);

    let categories = state
        .content
        .category_entries(language)
        .into_iter()
        .map(|entry| MakerCategory {
            options: state
                .content
                .category_options(language, entry.key)
                .iter()
                .map(|option: &OptionEntry| MakerOption {
                    id: option.id,
                    label: option.label.clone(),
                    selected: selection.is_selected(entry.key, option.id),
                })
                .collect(),
            key: entry.key,
            label: entry.label,
        })
        .collect();

    state.metrics.record_maker_view();

    Json(MakerResponse {
        language,
        languages: ContentStore::language_options(),
        selection,
        categories,
    })
}

async fn card(State(state): State<AppState>, RawQuery(query): RawQuery) -> Json<CardResponse> {
    let selection = SelectionState::from_query(query.as_deref().unwrap_or_default());
    let data = selection
        .target_language
        .and_then(|language| state.content.get(language));

    let sections = build_card_sections(data, &selection);

    if let Some(data) = data {
        let unmatched = unmatched_ids(data, &selection);
        if !unmatched.is_empty() {
            debug!(
                target_language = %data.id,
                ?unmatched,
                "Selected ids not listed for target language"
            );
            state.metrics.record_unmatched(unmatched.len());
        }
    }

    state.metrics.record_card(sections.len());

    Json(CardResponse {
        target: selection.target_language,
        sections,
    })
}

async fn share(State(state): State<AppState>, RawQuery(query): RawQuery) -> Json<ShareResponse> {
    let query = query.unwrap_or_default();
    let view = AppRoute::from_search(&query);
    let canonical = SelectionState::from_query(&query).to_query();

    let url = if canonical.is_empty() {
        view.path().to_string()
    } else {
        format!("{}?{}", view.path(), canonical)
    };

    state.metrics.record_share_link();

    Json(ShareResponse {
        view,
        query: canonical,
        url,
    })
}

async fn route(RawQuery(query): RawQuery) -> Json<RouteResponse> {
    let query = query.unwrap_or_default();
    let path = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    Json(RouteResponse {
        view: AppRoute::resolve(&path, &query),
    })
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.metrics.report())
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
