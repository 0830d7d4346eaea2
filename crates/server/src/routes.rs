use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use rutpoint_api_types::{ApiResponse, HealthStatus, RankQuery, TAXI_RANKS_PATH};
use rutpoint_transit::{Connection, Rank, RankIdentifier};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::normalize_prefix;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn create_router(state: AppState, api_prefix: &str) -> Router {
    let ranks = Router::new()
        .route(TAXI_RANKS_PATH, get(list_ranks))
        .route(&format!("{TAXI_RANKS_PATH}/{{id}}"), get(get_rank))
        .route(
            &format!("{TAXI_RANKS_PATH}/{{id}}/connections"),
            get(get_connections),
        );

    // nesting at "/" is rejected by axum, so the root mount merges instead
    let prefix = normalize_prefix(api_prefix);
    let api = if prefix.is_empty() {
        ranks
    } else {
        Router::new().nest(&prefix, ranks)
    };

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

async fn list_ranks(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Arc<Rank>>>>, ServiceError> {
    let Query(params) = query?;

    let ranks = match RankQuery::from_params(&params)? {
        RankQuery::Bounds(bounds) => state.engine.find_within_bounds(&bounds)?,
        RankQuery::Nearby { center, radius_m } => state.engine.find_nearby(center, radius_m)?,
        RankQuery::Destination(text) => state.engine.find_by_destination(&text)?,
        RankQuery::All => state.engine.find_all()?,
    };

    tracing::debug!(count = ranks.len(), "served rank query");
    Ok(Json(ApiResponse::new(ranks)))
}

async fn get_rank(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Arc<Rank>>>, ServiceError> {
    let id = RankIdentifier::new(&id);
    match state.engine.find_by_id(&id)? {
        Some(rank) => Ok(Json(ApiResponse::new(rank))),
        None => Err(ServiceError::NotFound(id)),
    }
}

/// Unknown ids yield an empty list, not 404.
async fn get_connections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Connection>>>, ServiceError> {
    let connections = state.engine.find_connections(&RankIdentifier::new(&id))?;
    Ok(Json(ApiResponse::new(connections)))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
    })
}
