use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::db::Storage;
use crate::handlers::{health, records, report};

/// Shared per-request state. The store is the only thing requests share.
#[derive(Clone)]
pub struct BoardState {
    pub storage: Storage,
}

impl BoardState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

/// All routes. Requests running past `request_timeout` are answered with
/// 408 and their in-flight store calls are dropped.
pub fn board_router(state: BoardState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/competitions",
            post(records::create_competition).get(records::list_competitions),
        )
        .route(
            "/categories",
            post(records::create_category).get(records::list_categories),
        )
        .route("/rounds", post(records::create_round))
        .route(
            "/competitions/{competition_id}/rounds",
            get(records::list_rounds),
        )
        .route(
            "/competitors",
            post(records::create_competitor).get(records::list_competitors),
        )
        .route("/boulder-problems", post(records::create_boulder_problem))
        .route(
            "/rounds/{round_id}/boulder-problems",
            get(records::list_boulder_problems),
        )
        .route(
            "/scores",
            post(records::create_score).get(report::scores_report),
        )
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
