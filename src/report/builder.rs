use crate::error::ReportError;
use crate::report::pivot::{POINTS_COLUMN, ROUND_NUMBER_COLUMN, build_round_columns};
use crate::report::rounds::{RoundCount, RoundCounter};
use tracing::{debug, warn};

pub const COMPETITOR_COLUMN: &str = "competitor_name";
pub const TOTAL_COLUMN: &str = "total";

/// A generated leaderboard statement and the values bound to its
/// placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStatement {
    pub sql: String,
    pub competition: String,
    pub category: String,
    pub rounds: RoundCount,
}

impl ReportStatement {
    /// Bind values in the order their `?` placeholders appear in `sql`.
    pub fn binds(&self) -> [&str; 2] {
        [self.competition.as_str(), self.category.as_str()]
    }
}

/// Build the leaderboard statement for `category` within `competition`.
///
/// The shape depends on how many rounds the competition has right now, so the
/// round count is fetched on every call. Names are only ever bound, never
/// spliced into the text.
pub async fn build_report<R>(
    counter: &R,
    category: &str,
    competition: &str,
) -> Result<ReportStatement, ReportError>
where
    R: RoundCounter,
{
    let rounds = counter.count_rounds(competition).await?;
    if rounds.is_sparse() {
        warn!(
            competition,
            competition_id = rounds.competition_id,
            rounds = rounds.rounds,
            highest_number = ?rounds.highest_number,
            "round numbers are not contiguous from 1; rounds above the count are left out of the per-round columns"
        );
    }

    let sql = compose_statement(&build_round_columns(rounds.rounds));
    debug!(competition, category, rounds = rounds.rounds, "built score report statement");

    Ok(ReportStatement {
        sql,
        competition: competition.to_string(),
        category: category.to_string(),
        rounds,
    })
}

/// Wrap the pivot fragment in the fixed join/filter/sort template.
///
/// Placeholders: `?` #1 competition name, `?` #2 category name.
fn compose_statement(pivot_fragment: &str) -> String {
    let mut projection = vec![
        COMPETITOR_COLUMN.to_string(),
        format!("COALESCE(SUM({POINTS_COLUMN}), 0) AS {TOTAL_COLUMN}"),
    ];
    if !pivot_fragment.is_empty() {
        projection.push(pivot_fragment.to_string());
    }
    let projection = projection.join(",\n    ");

    format!(
        r#"SELECT
    {projection}
FROM (
    SELECT
        c.id AS competitor_id,
        c.name AS {COMPETITOR_COLUMN},
        cat.name AS category_name,
        cs.{ROUND_NUMBER_COLUMN},
        cs.{POINTS_COLUMN}
    FROM competitors c
    INNER JOIN categories cat ON c.category_id = cat.id
    LEFT JOIN (
        SELECT s.competitor_id, s.points AS {POINTS_COLUMN}, r.number AS {ROUND_NUMBER_COLUMN}
        FROM scores s
        INNER JOIN boulder_problems bp ON s.problem_id = bp.id
        INNER JOIN rounds r ON bp.round_id = r.id
        INNER JOIN competitions comp ON r.competition_id = comp.id
        WHERE comp.name = ?
    ) AS cs ON cs.competitor_id = c.id
) AS subquery
WHERE category_name = ?
GROUP BY competitor_id, {COMPETITOR_COLUMN}
ORDER BY {TOTAL_COLUMN} DESC, {COMPETITOR_COLUMN} ASC"#
    )
}
