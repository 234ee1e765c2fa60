//! Wire protocol for both backends
//!
//! Request bodies, response envelopes and the tolerant decoders that turn
//! them into core domain types. Nothing here performs I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sqlbench_core::prelude::*;
use sqlbench_core::{ColumnDescriptor, GradeOutcome, Row, SchemaInfo};

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunRequest<'a> {
    pub sql: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest<'a> {
    pub problem_id: &'a str,
    pub sql: &'a str,
}

/// Filters and window for a movie page request.
///
/// The backend never reports a total, so callers infer "has more" from the
/// page coming back full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub genre: Option<String>,
    pub actor_id: Option<String>,
    pub year: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl MovieQuery {
    /// Query-string pairs; unset filters are omitted entirely.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(genre) = non_blank(&self.genre) {
            params.push(("genre", genre.to_string()));
        }
        if let Some(actor_id) = non_blank(&self.actor_id) {
            params.push(("actorId", actor_id.to_string()));
        }
        if let Some(year) = non_blank(&self.year) {
            params.push(("year", year.to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// Body of any non-2xx response that carries a message
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextIdResponse {
    #[serde(default)]
    pub next_id: Option<String>,
}

impl NextIdResponse {
    /// Blank ids count as "no next problem"
    pub fn into_next_id(self) -> Option<String> {
        self.next_id.filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HintResponse {
    #[serde(default)]
    pub verbs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SolutionResponse {
    #[serde(default)]
    pub sql: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SchemaResponse {
    #[serde(default)]
    pub schemas: BTreeMap<String, Vec<Value>>,
}

impl SchemaResponse {
    /// Decode column lists; a table whose entries are error objects or
    /// otherwise undecodable is left out (no schema info).
    pub fn into_schema(self) -> SchemaInfo {
        let mut tables = BTreeMap::new();
        for (table, entries) in self.schemas {
            let columns: std::result::Result<Vec<ColumnDescriptor>, _> = entries
                .into_iter()
                .map(serde_json::from_value::<ColumnDescriptor>)
                .collect();
            match columns {
                Ok(columns) => {
                    tables.insert(table, columns);
                }
                Err(e) => {
                    debug!("Schema for table '{}' unavailable: {}", table, e);
                }
            }
        }
        SchemaInfo::new(tables)
    }
}

/// `POST /api/run` answers with either `rows` or `error`
#[derive(Debug, Default, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RunResponse {
    pub fn into_result(self) -> Result<Vec<Row>> {
        if let Some(message) = self.error {
            return Err(Error::backend(message));
        }
        self.rows
            .ok_or_else(|| Error::protocol("run response has neither rows nor error"))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub expected_count: Option<u64>,
    #[serde(default)]
    pub actual_count: Option<u64>,
    #[serde(default)]
    pub sample_expected: Vec<Row>,
    #[serde(default)]
    pub sample_actual: Vec<Row>,
}

impl GradeResponse {
    pub fn into_result(self) -> Result<GradeOutcome> {
        if let Some(message) = self.error {
            return Err(Error::backend(message));
        }
        let correct = self
            .correct
            .ok_or_else(|| Error::protocol("grade response is missing 'correct'"))?;
        Ok(GradeOutcome {
            correct,
            expected_count: self.expected_count.unwrap_or_default(),
            actual_count: self.actual_count.unwrap_or_default(),
            sample_expected: self.sample_expected,
            sample_actual: self.sample_actual,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenresResponse {
    #[serde(default)]
    pub genres: Value,
}

impl GenresResponse {
    /// Accepts plain names or `{ "name": ... }` objects; anything else is skipped.
    pub fn into_names(self) -> Vec<String> {
        let Value::Array(entries) = self.genres else {
            return Vec::new();
        };
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name),
                Value::Object(mut obj) => match obj.remove("name") {
                    Some(Value::String(name)) => Some(name),
                    _ => None,
                },
                _ => None,
            })
            .filter(|name| !name.trim().is_empty())
            .collect()
    }
}

/// `{ "items": [...] }` envelope used by list endpoints
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ItemsResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
