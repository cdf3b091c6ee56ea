//! Competitions API routes
//!
//! ```text
//! GET /api/v0/competitions?managed_by_me=<bool>&q=<text>
//! GET /api/v0/competitions/{id}
//! GET /api/v0/competitions/{id}/wcif
//! PUT /api/v0/competitions/{id}/wcif/events
//! ```

use crate::config::CorsMode;
use crate::error::http_mapper::ApiError;
use crate::server::extract::Caller;
use crate::server::state::AppState;
use crate::wcif::{CompetitionSummary, SYNC_SUCCESS_STATUS, WcifCompetition, projection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, instrument};

/// Prefix every API route is nested under
pub const API_PREFIX: &str = "/api/v0";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub managed_by_me: Option<bool>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Build the application router
pub fn router(state: AppState, cors: CorsMode) -> Router {
    let api = Router::new()
        .route("/competitions", get(list_competitions))
        .route("/competitions/{id}", get(show_competition))
        .route("/competitions/{id}/wcif", get(show_wcif))
        .route("/competitions/{id}/wcif/events", put(update_events));

    let router = Router::new()
        .nest(API_PREFIX, api)
        .fallback(route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        CorsMode::Disabled => router,
        CorsMode::Permissive => router.layer(CorsLayer::permissive()),
    }
}

#[instrument(skip_all)]
async fn list_competitions(
    State(state): State<AppState>,
    Caller(principals): Caller,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<CompetitionSummary>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let competitions = state.store.search(query.q.as_deref()).await;

    let listed: Vec<CompetitionSummary> = if query.managed_by_me.unwrap_or(false) {
        let user = state.engine.managed_by_filter(&principals)?;
        competitions
            .iter()
            .filter(|c| state.engine.owns(user, c))
            .map(projection::summary)
            .collect()
    } else {
        competitions
            .iter()
            .filter(|c| state.engine.is_visible_to(c, &principals))
            .map(projection::summary)
            .collect()
    };

    debug!(count = listed.len(), "Listed competitions");
    Ok(Json(listed))
}

#[instrument(skip(state, principals))]
async fn show_competition(
    State(state): State<AppState>,
    Caller(principals): Caller,
    Path(id): Path<String>,
) -> Result<Json<CompetitionSummary>, ApiError> {
    let found = state.store.find(&id).await;
    let competition = state.engine.resolve_visible(&id, found, &principals)?;
    Ok(Json(projection::summary(&competition)))
}

#[instrument(skip(state, principals))]
async fn show_wcif(
    State(state): State<AppState>,
    Caller(principals): Caller,
    Path(id): Path<String>,
) -> Result<Json<WcifCompetition>, ApiError> {
    let found = state.store.find(&id).await;
    let competition = state.engine.resolve_visible(&id, found, &principals)?;
    state.engine.require_manage(&competition, &principals)?;
    Ok(Json(projection::wcif(&competition)))
}

#[instrument(skip(state, principals, body))]
async fn update_events(
    State(state): State<AppState>,
    Caller(principals): Caller,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let found = state.store.find(&id).await;
    let competition = state.engine.resolve_visible(&id, found, &principals)?;
    state.engine.require_manage(&competition, &principals)?;

    let Json(payload) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state.sync.replace_events(&competition.id, &payload).await?;

    Ok(Json(json!({ "status": SYNC_SUCCESS_STATUS })))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "No route matches the request",
            "error_type": "RouteNotFound"
        })),
    )
}
