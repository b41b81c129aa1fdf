use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Competition {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Round {
    pub id: i64,
    pub number: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub competition_id: i64,
}

/// Competitor as exposed to clients. Email and password hash are stored but
/// never selected into this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Competitor {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct BoulderProblem {
    pub id: i64,
    pub number: i64,
    pub round_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Score {
    pub id: i64,
    pub attempts: i64,
    pub points: i64,
    pub competitor_id: i64,
    pub problem_id: i64,
}
