use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::info;

use crate::report::{self, ReportRow};
use crate::{BoardError, router::BoardState};

#[derive(Debug, Deserialize)]
pub struct ScoresQuery {
    pub category: String,
    pub competition: String,
}

/// GET /scores?category=..&competition=.. -> leaderboard rows, best total first.
pub async fn scores_report(
    State(state): State<BoardState>,
    Query(query): Query<ScoresQuery>,
) -> Result<Json<Vec<ReportRow>>, BoardError> {
    let rows = report::leaderboard(&state.storage, &query.category, &query.competition).await?;
    info!(
        category = %query.category,
        competition = %query.competition,
        rows = rows.len(),
        "served score report"
    );
    Ok(Json(rows))
}
