//! Domain types shared by the gateway and the session controllers
//!
//! Every type here is a read-only projection of what the backends return.
//! Field names follow the wire (`camelCase`) through serde renames so the
//! gateway can decode straight into them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A single result row. Key order is the backend's column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

// ─────────────────────────────────────────────────────────────────────────────
// Practice problems
// ─────────────────────────────────────────────────────────────────────────────

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Any value outside the known three; listed but never grouped
    Unrated,
}

impl Difficulty {
    /// Display order used by the catalog
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Unrated => "unrated",
        }
    }

    /// Case-insensitive parse; blank input means easy.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Difficulty::parse(&raw).unwrap_or(Difficulty::Unrated))
    }
}

/// A practice problem as served by the backend (solution never included)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Tables the problem is about, in display order
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(default)]
    pub starter_sql: Option<String>,
}

/// One column of a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub nullable: bool,
}

/// Column metadata for the tables of one problem.
///
/// A table missing from the map has no schema info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub tables: BTreeMap<String, Vec<ColumnDescriptor>>,
}

impl SchemaInfo {
    pub fn new(tables: BTreeMap<String, Vec<ColumnDescriptor>>) -> Self {
        Self { tables }
    }

    /// Columns for `table`, empty when unknown
    pub fn columns_for(&self, table: &str) -> &[ColumnDescriptor] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }
}

/// Result of checking a query against the reference solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    pub correct: bool,
    pub expected_count: u64,
    pub actual_count: u64,
    #[serde(default)]
    pub sample_expected: Vec<Row>,
    #[serde(default)]
    pub sample_actual: Vec<Row>,
}

impl GradeOutcome {
    /// One-line verdict as shown under the results
    pub fn summary(&self) -> String {
        if self.correct {
            "Correct!".to_string()
        } else {
            format!(
                "Not correct. Expected {}, got {}.",
                self.expected_count, self.actual_count
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Movie suggestor
// ─────────────────────────────────────────────────────────────────────────────

/// Ranked actor autocomplete entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSuggestion {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub birth_year: Option<i64>,
}

impl ActorSuggestion {
    /// `Name (1956)` or just `Name`
    pub fn label(&self) -> String {
        match self.birth_year {
            Some(year) => format!("{} ({})", self.name, year),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub year: Option<i64>,
    /// Comma-separated genre list as stored upstream
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub votes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub actors: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmCredit {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub votes: Option<i64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDetail {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub birth_year: Option<i64>,
    #[serde(default)]
    pub top_films: Vec<FilmCredit>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient numeric decoding
// ─────────────────────────────────────────────────────────────────────────────

// Upstream columns are loaded from TSV dumps, so numbers sometimes arrive as
// strings ("1994") or as IMDb's "\N" placeholder.

fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_float<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}
