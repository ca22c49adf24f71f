//! HTTP routes

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use evacroute_core::{FloorPlan, plan_route};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::ListenConfig;
use crate::dto::{FloorSummary, Health, RouteBody, RouteResponse};
use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Handlers without middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/floors", get(list_floors))
        .route("/floors/{floor_id}", get(floor_plan))
        .route("/floors/{floor_id}/route", post(route))
        .with_state(state)
}

/// The full service: handlers plus tracing, CORS, concurrency limit and timeout.
///
/// `Router::layer` instantiates its layers once per route, so the handlers sit
/// behind a single fallback service and every route shares one set of
/// concurrency permits.
pub fn app(state: AppState, listen: &ListenConfig) -> Router {
    Router::new().fallback_service(router(state)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .concurrency_limit(listen.concurrency_limit)
            .timeout(Duration::from_secs(listen.request_timeout_secs)),
    )
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ErrorBody>) {
    let status = if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        floors: state.floors().count(),
    })
}

async fn list_floors(State(state): State<AppState>) -> Json<Vec<FloorSummary>> {
    Json(
        state
            .floors()
            .map(|floor| FloorSummary::from(floor.as_ref()))
            .collect(),
    )
}

async fn floor_plan(
    State(state): State<AppState>,
    Path(floor_id): Path<String>,
) -> Result<Json<FloorPlan>, ApiError> {
    let floor = state.floor(&floor_id)?;
    Ok(Json(floor.plan.clone()))
}

async fn route(
    State(state): State<AppState>,
    Path(floor_id): Path<String>,
    payload: Result<Json<RouteBody>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let floor = state.floor(&floor_id)?;
    let Json(body) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let request = body.into_request(&floor.graph)?;
    let config = state.search;

    let result = tokio::task::spawn_blocking(move || plan_route(&floor.graph, &request, &config))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;

    match &result {
        Some(found) => debug!(
            "Floor {floor_id}: route to {} costs {:.2}",
            found.goal, found.cost
        ),
        None => debug!("Floor {floor_id}: no route"),
    }
    Ok(Json(result.into()))
}
