//! SQL DDL for initializing the competition store.
//! SQLite-first design; statements are idempotent.

/// SQLite schema for the six relations:
/// - every `id` is INTEGER PRIMARY KEY AUTOINCREMENT
/// - children reference parents through enforced foreign keys
/// - `competitions.name` UNIQUE; the report resolves competitions by name
/// - `(competition_id, number)` UNIQUE so a round number maps to one pivot column
/// - `(competitor_id, problem_id)` UNIQUE, one score per competitor and problem
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS competitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rounds (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number INTEGER NOT NULL CHECK (number >= 1),
    start_date TEXT NOT NULL, -- RFC3339
    end_date TEXT NOT NULL, -- RFC3339
    competition_id INTEGER NOT NULL REFERENCES competitions(id),
    UNIQUE (competition_id, number)
);

CREATE TABLE IF NOT EXISTS competitors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL, -- argon2 encoded hash
    category_id INTEGER NOT NULL REFERENCES categories(id)
);

CREATE TABLE IF NOT EXISTS boulder_problems (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number INTEGER NOT NULL CHECK (number >= 1),
    round_id INTEGER NOT NULL REFERENCES rounds(id)
);

CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    attempts INTEGER NOT NULL CHECK (attempts >= 0),
    points INTEGER NOT NULL CHECK (points >= 0),
    competitor_id INTEGER NOT NULL REFERENCES competitors(id),
    problem_id INTEGER NOT NULL REFERENCES boulder_problems(id),
    UNIQUE (competitor_id, problem_id)
);

CREATE INDEX IF NOT EXISTS idx_competitors_category_id ON competitors(category_id);
CREATE INDEX IF NOT EXISTS idx_boulder_problems_round_id ON boulder_problems(round_id);
CREATE INDEX IF NOT EXISTS idx_scores_problem_id ON scores(problem_id);
"#;
