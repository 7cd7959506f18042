use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lotto_core::error::ResultError;
use lotto_core::results::response::{ResponseBody, ResultSet};
use lotto_core::results::service::{RangeQuery, RelativeWindow, ResultService};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::query::QueryParams;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResultService>,
}

type ApiResponse = (StatusCode, Json<ResponseBody>);

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/custom", get(custom))
        .route("/api/today", get(today))
        .route("/api/yesterday", get(yesterday))
        .route("/api/latest", get(latest))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Hello Chatfuel and World!" }))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn custom(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResponse {
    let params = QueryParams::new(pairs);
    respond("custom", run_custom(&state, &params).await)
}

async fn run_custom(state: &AppState, params: &QueryParams) -> Result<ResultSet, ResultError> {
    let query = RangeQuery {
        start_date: params.required("start_date")?,
        end_date: params.required("end_date")?,
        days: params.list("days"),
        games: params.list("games"),
        peso_sign: params.flag("peso_sign", true)?,
    };
    let results = state.service.results_by_range(query).await?;
    Ok(ResultSet::Structured(results))
}

async fn today(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResponse {
    relative(&state, QueryParams::new(pairs), RelativeWindow::Today).await
}

async fn yesterday(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResponse {
    relative(&state, QueryParams::new(pairs), RelativeWindow::Yesterday).await
}

async fn latest(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResponse {
    relative(&state, QueryParams::new(pairs), RelativeWindow::Latest).await
}

async fn relative(state: &AppState, params: QueryParams, window: RelativeWindow) -> ApiResponse {
    respond(window.as_str(), run_relative(state, &params, window).await)
}

async fn run_relative(
    state: &AppState,
    params: &QueryParams,
    window: RelativeWindow,
) -> Result<ResultSet, ResultError> {
    let games = params.list("games");
    let peso_sign = params.flag("peso_sign", true)?;
    let chat = params.flag("chatfuel", false)?;
    state
        .service
        .relative_result_set(window, games, peso_sign, chat)
        .await
}

fn respond(endpoint: &'static str, result: Result<ResultSet, ResultError>) -> ApiResponse {
    match result {
        Ok(set) => {
            if set.is_empty() {
                tracing::info!(endpoint, "no results available yet");
            }
            (StatusCode::OK, Json(ResponseBody::from(set)))
        }
        Err(err) if err.is_validation() => {
            tracing::warn!(endpoint, error = %err, "rejected request");
            (StatusCode::BAD_REQUEST, Json(ResponseBody::failure(&err)))
        }
        Err(err) => {
            if let ResultError::Upstream(cause) = &err {
                sentry_anyhow::capture_anyhow(cause);
            }
            tracing::error!(endpoint, error = %err, "results request failed");
            (StatusCode::BAD_GATEWAY, Json(ResponseBody::failure(&err)))
        }
    }
}
