//! Scoring report: a per-category leaderboard with one column per round.
//!
//! - `rounds.rs`: how many rounds a competition has
//! - `pivot.rs`: one conditional-sum column per round
//! - `builder.rs`: the parameterized leaderboard statement
//! - `row.rs`: execution and shaping of rows with a run-time column set

pub mod builder;
pub mod pivot;
pub mod rounds;
pub mod row;

pub use builder::{ReportStatement, build_report};
pub use pivot::build_round_columns;
pub use rounds::{RoundCount, RoundCounter};
pub use row::{ReportRow, ReportValue};

use crate::db::Storage;
use crate::error::ReportError;

/// Build and run the leaderboard for `category` in `competition`.
pub async fn leaderboard(
    storage: &Storage,
    category: &str,
    competition: &str,
) -> Result<Vec<ReportRow>, ReportError> {
    let statement = build_report(storage, category, competition).await?;
    statement.fetch(storage.pool()).await
}
