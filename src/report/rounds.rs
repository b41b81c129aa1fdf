use crate::db::Storage;
use crate::error::RoundCountError;

/// Round bookkeeping for one competition, as seen by the report builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundCount {
    pub competition_id: i64,
    pub rounds: u32,
    /// Largest round number in use, `None` when there are no rounds.
    pub highest_number: Option<i64>,
}

impl RoundCount {
    /// Whether round numbers can cover anything but exactly `1..=rounds`.
    pub fn is_sparse(&self) -> bool {
        match self.highest_number {
            Some(highest) => highest != i64::from(self.rounds),
            None => false,
        }
    }
}

/// Source of round counts, keyed by competition name.
pub trait RoundCounter: Send + Sync {
    fn count_rounds(
        &self,
        competition: &str,
    ) -> impl Future<Output = Result<RoundCount, RoundCountError>> + Send;
}

impl RoundCounter for Storage {
    async fn count_rounds(&self, competition: &str) -> Result<RoundCount, RoundCountError> {
        let row: Option<(i64, i64, Option<i64>)> = sqlx::query_as(
            r#"SELECT c.id, COUNT(r.id), MAX(r.number)
               FROM competitions c
               LEFT JOIN rounds r ON r.competition_id = c.id
               WHERE c.name = ?
               GROUP BY c.id"#,
        )
        .bind(competition)
        .fetch_optional(self.pool())
        .await
        .map_err(RoundCountError::Query)?;

        let Some((competition_id, count, highest_number)) = row else {
            return Err(RoundCountError::NotFound(competition.to_string()));
        };
        let rounds = u32::try_from(count)
            .map_err(|e| RoundCountError::Query(sqlx::Error::Decode(Box::new(e))))?;

        Ok(RoundCount {
            competition_id,
            rounds,
            highest_number,
        })
    }
}
