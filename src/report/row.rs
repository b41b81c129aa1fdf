//! Rows of a report whose columns are only known after execution.

use crate::error::ReportError;
use crate::report::builder::ReportStatement;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

/// Loosely-typed cell of a report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Int(i64),
    Real(f64),
    Text(String),
    Null,
}

/// Ordered column name -> value mapping. Serializes as a JSON object whose
/// keys keep the statement's column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportRow(Vec<(String, ReportValue)>);

impl ReportRow {
    pub fn get(&self, column: &str) -> Option<&ReportValue> {
        self.0
            .iter()
            .find_map(|(name, value)| (name == column).then_some(value))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, ReportValue)> for ReportRow {
    fn from_iter<I: IntoIterator<Item = (String, ReportValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl ReportStatement {
    /// Execute against `pool` and shape every row by its result columns.
    pub async fn fetch(&self, pool: &SqlitePool) -> Result<Vec<ReportRow>, ReportError> {
        let [competition, category] = self.binds();
        let rows = sqlx::query(&self.sql)
            .bind(competition)
            .bind(category)
            .fetch_all(pool)
            .await
            .map_err(ReportError::Query)?;

        debug!(
            competition,
            category,
            rows = rows.len(),
            "executed score report"
        );
        rows.iter().map(shape_row).collect()
    }
}

/// Pair each result column name with the decoded value of this row.
pub fn shape_row(row: &SqliteRow) -> Result<ReportRow, ReportError> {
    row.columns()
        .iter()
        .map(|column| {
            let value = decode_value(row, column.ordinal()).map_err(ReportError::Scan)?;
            Ok((column.name().to_string(), value))
        })
        .collect()
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<ReportValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(ReportValue::Null);
    }
    // SQLite reports the storage class of the value itself, not the column.
    let type_name = raw.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get::<i64, _>(index).map(ReportValue::Int),
        "REAL" | "NUMERIC" => row.try_get::<f64, _>(index).map(ReportValue::Real),
        "TEXT" => row.try_get::<String, _>(index).map(ReportValue::Text),
        other => Err(sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: format!("unsupported report value type `{other}`").into(),
        }),
    }
}
