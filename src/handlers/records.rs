//! Insert and select endpoints for the six record types.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::db::{BoulderProblem, Category, Competition, Competitor, Round, Score};
use crate::service::password::hash_password;
use crate::types::records::{
    NewBoulderProblem, NewCategory, NewCompetition, NewCompetitor, NewRound, NewScore,
};
use crate::{BoardError, router::BoardState};

type Created<T> = (StatusCode, Json<T>);

fn created<T>(value: T) -> Created<T> {
    (StatusCode::CREATED, Json(value))
}

/// POST /competitions
pub async fn create_competition(
    State(state): State<BoardState>,
    Json(body): Json<NewCompetition>,
) -> Result<Created<Competition>, BoardError> {
    body.validate()?;
    let competition = state.storage.insert_competition(&body).await?;
    info!(id = competition.id, name = %competition.name, "competition created");
    Ok(created(competition))
}

/// GET /competitions
pub async fn list_competitions(
    State(state): State<BoardState>,
) -> Result<Json<Vec<Competition>>, BoardError> {
    Ok(Json(state.storage.list_competitions().await?))
}

/// POST /categories
pub async fn create_category(
    State(state): State<BoardState>,
    Json(body): Json<NewCategory>,
) -> Result<Created<Category>, BoardError> {
    body.validate()?;
    let category = state.storage.insert_category(&body).await?;
    info!(id = category.id, name = %category.name, "category created");
    Ok(created(category))
}

/// GET /categories
pub async fn list_categories(
    State(state): State<BoardState>,
) -> Result<Json<Vec<Category>>, BoardError> {
    Ok(Json(state.storage.list_categories().await?))
}

/// POST /rounds
pub async fn create_round(
    State(state): State<BoardState>,
    Json(body): Json<NewRound>,
) -> Result<Created<Round>, BoardError> {
    body.validate()?;
    let round = state.storage.insert_round(&body).await?;
    info!(
        id = round.id,
        number = round.number,
        competition_id = round.competition_id,
        "round created"
    );
    Ok(created(round))
}

/// GET /competitions/{competition_id}/rounds
pub async fn list_rounds(
    State(state): State<BoardState>,
    Path(competition_id): Path<i64>,
) -> Result<Json<Vec<Round>>, BoardError> {
    Ok(Json(state.storage.list_rounds(competition_id).await?))
}

/// POST /competitors -> the stored competitor, without the password.
pub async fn create_competitor(
    State(state): State<BoardState>,
    Json(body): Json<NewCompetitor>,
) -> Result<Created<Competitor>, BoardError> {
    body.validate()?;
    let NewCompetitor {
        name,
        email,
        password,
        category_id,
    } = body;
    let password_hash = hash_password(password).await?;
    let competitor = state
        .storage
        .insert_competitor(&name, &email, &password_hash, category_id)
        .await?;
    info!(
        id = competitor.id,
        category_id = competitor.category_id,
        "competitor registered"
    );
    Ok(created(competitor))
}

/// GET /competitors
pub async fn list_competitors(
    State(state): State<BoardState>,
) -> Result<Json<Vec<Competitor>>, BoardError> {
    Ok(Json(state.storage.list_competitors().await?))
}

/// POST /boulder-problems
pub async fn create_boulder_problem(
    State(state): State<BoardState>,
    Json(body): Json<NewBoulderProblem>,
) -> Result<Created<BoulderProblem>, BoardError> {
    body.validate()?;
    let problem = state.storage.insert_boulder_problem(&body).await?;
    info!(id = problem.id, round_id = problem.round_id, "boulder problem created");
    Ok(created(problem))
}

/// GET /rounds/{round_id}/boulder-problems
pub async fn list_boulder_problems(
    State(state): State<BoardState>,
    Path(round_id): Path<i64>,
) -> Result<Json<Vec<BoulderProblem>>, BoardError> {
    Ok(Json(state.storage.list_boulder_problems(round_id).await?))
}

/// POST /scores
pub async fn create_score(
    State(state): State<BoardState>,
    Json(body): Json<NewScore>,
) -> Result<Created<Score>, BoardError> {
    body.validate()?;
    let score = state.storage.insert_score(&body).await?;
    info!(
        id = score.id,
        competitor_id = score.competitor_id,
        problem_id = score.problem_id,
        points = score.points,
        "score recorded"
    );
    Ok(created(score))
}
