use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

/// Failure to resolve how many rounds a competition has.
#[derive(Debug, ThisError)]
pub enum RoundCountError {
    #[error("competition `{0}` not found")]
    NotFound(String),

    #[error("round count query failed: {0}")]
    Query(#[source] SqlxError),
}

/// Failures of the scoring report path. None of them are retried.
#[derive(Debug, ThisError)]
pub enum ReportError {
    #[error("failed to build score report: {0}")]
    Build(#[from] RoundCountError),

    #[error("failed to execute score report: {0}")]
    Query(#[source] SqlxError),

    #[error("failed to decode score report row: {0}")]
    Scan(#[source] SqlxError),
}

#[derive(Debug, ThisError)]
pub enum BoardError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] argon2::Error),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl IntoResponse for BoardError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            BoardError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "INVALID_REQUEST".to_string(),
                    message,
                },
            ),
            BoardError::Report(err) => {
                error!(error = %err, "score report failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "REPORT_ERROR".to_string(),
                        message: err.to_string(),
                    },
                )
            }
            BoardError::DatabaseError(SqlxError::RowNotFound) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "Record not found.".to_string(),
                },
            ),
            BoardError::DatabaseError(SqlxError::Database(db_err))
                if db_err.is_unique_violation() =>
            {
                (
                    StatusCode::CONFLICT,
                    ApiErrorBody {
                        code: "CONFLICT".to_string(),
                        message: "A record with the same unique fields already exists."
                            .to_string(),
                    },
                )
            }
            BoardError::DatabaseError(SqlxError::Database(db_err))
                if db_err.is_foreign_key_violation() || db_err.is_check_violation() =>
            {
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorBody {
                        code: "INVALID_REFERENCE".to_string(),
                        message: format!("Rejected by the store: {}", db_err.message()),
                    },
                )
            }
            err @ (BoardError::DatabaseError(_)
            | BoardError::PasswordHash(_)
            | BoardError::TaskJoin(_)) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
