//! Database module: models and schema for the competition store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the pooled `Storage` handle with insert/select queries

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{BoulderProblem, Category, Competition, Competitor, Round, Score};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Storage};
