//! Request bodies for the insert endpoints.

use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewCompetition {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRound {
    pub number: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub competition_id: i64,
}

/// Registration payload. `password` is plain text here and hashed before it
/// reaches the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompetitor {
    pub name: String,
    pub email: String,
    pub password: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBoulderProblem {
    pub number: i64,
    pub round_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewScore {
    pub attempts: i64,
    pub points: i64,
    pub competitor_id: i64,
    pub problem_id: i64,
}

fn require_text(field: &str, value: &str) -> Result<(), BoardError> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("`{field}` must not be empty")));
    }
    Ok(())
}

fn require_at_least(field: &str, value: i64, min: i64) -> Result<(), BoardError> {
    if value < min {
        return Err(BoardError::Validation(format!(
            "`{field}` must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

impl NewCompetition {
    pub fn validate(&self) -> Result<(), BoardError> {
        require_text("name", &self.name)
    }
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), BoardError> {
        require_text("name", &self.name)
    }
}

impl NewRound {
    pub fn validate(&self) -> Result<(), BoardError> {
        require_at_least("number", self.number, 1)?;
        if self.end_date < self.start_date {
            return Err(BoardError::Validation(
                "`end_date` must not be before `start_date`".to_string(),
            ));
        }
        Ok(())
    }
}

impl NewCompetitor {
    pub fn validate(&self) -> Result<(), BoardError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("password", &self.password)
    }
}

impl NewBoulderProblem {
    pub fn validate(&self) -> Result<(), BoardError> {
        require_at_least("number", self.number, 1)
    }
}

impl NewScore {
    pub fn validate(&self) -> Result<(), BoardError> {
        require_at_least("attempts", self.attempts, 0)?;
        require_at_least("points", self.points, 0)
    }
}
