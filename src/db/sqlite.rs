use crate::config::Config;
use crate::db::models::{BoulderProblem, Category, Competition, Competitor, Round, Score};
use crate::db::schema::SQLITE_INIT;
use crate::error::BoardError;
use crate::types::records::{
    NewBoulderProblem, NewCategory, NewCompetition, NewRound, NewScore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Handle over the competition store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `cfg.database_url` and initialize the schema.
    pub async fn connect(cfg: &Config) -> Result<Self, BoardError> {
        let connect_opts = SqliteConnectOptions::from_str(&cfg.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        info!(database_url = %cfg.database_url, "store ready");
        Ok(storage)
    }

    /// Private in-memory store on a single long-lived connection.
    pub async fn in_memory() -> Result<Self, BoardError> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BoardError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn insert_competition(&self, new: &NewCompetition) -> Result<Competition, BoardError> {
        let row = sqlx::query_as::<_, Competition>(
            "INSERT INTO competitions (name) VALUES (?) RETURNING id, name",
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_competitions(&self) -> Result<Vec<Competition>, BoardError> {
        let rows = sqlx::query_as::<_, Competition>("SELECT id, name FROM competitions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn insert_category(&self, new: &NewCategory) -> Result<Category, BoardError> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES (?) RETURNING id, name",
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, BoardError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn insert_round(&self, new: &NewRound) -> Result<Round, BoardError> {
        let row = sqlx::query_as::<_, Round>(
            r#"INSERT INTO rounds (number, start_date, end_date, competition_id)
               VALUES (?, ?, ?, ?)
               RETURNING id, number, start_date, end_date, competition_id"#,
        )
        .bind(new.number)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.competition_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Rounds of one competition, by round number.
    pub async fn list_rounds(&self, competition_id: i64) -> Result<Vec<Round>, BoardError> {
        let rows = sqlx::query_as::<_, Round>(
            r#"SELECT id, number, start_date, end_date, competition_id
               FROM rounds WHERE competition_id = ? ORDER BY number"#,
        )
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Store a competitor whose password has already been hashed.
    pub async fn insert_competitor(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        category_id: i64,
    ) -> Result<Competitor, BoardError> {
        let row = sqlx::query_as::<_, Competitor>(
            r#"INSERT INTO competitors (name, email, password, category_id)
               VALUES (?, ?, ?, ?)
               RETURNING id, name, category_id"#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_competitors(&self) -> Result<Vec<Competitor>, BoardError> {
        let rows = sqlx::query_as::<_, Competitor>(
            "SELECT id, name, category_id FROM competitors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_boulder_problem(
        &self,
        new: &NewBoulderProblem,
    ) -> Result<BoulderProblem, BoardError> {
        let row = sqlx::query_as::<_, BoulderProblem>(
            "INSERT INTO boulder_problems (number, round_id) VALUES (?, ?) RETURNING id, number, round_id",
        )
        .bind(new.number)
        .bind(new.round_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_boulder_problems(&self, round_id: i64) -> Result<Vec<BoulderProblem>, BoardError> {
        let rows = sqlx::query_as::<_, BoulderProblem>(
            "SELECT id, number, round_id FROM boulder_problems WHERE round_id = ? ORDER BY number",
        )
        .bind(round_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_score(&self, new: &NewScore) -> Result<Score, BoardError> {
        let row = sqlx::query_as::<_, Score>(
            r#"INSERT INTO scores (attempts, points, competitor_id, problem_id)
               VALUES (?, ?, ?, ?)
               RETURNING id, attempts, points, competitor_id, problem_id"#,
        )
        .bind(new.attempts)
        .bind(new.points)
        .bind(new.competitor_id)
        .bind(new.problem_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
