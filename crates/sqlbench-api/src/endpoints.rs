//! URL construction for both backends

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use sqlbench_core::prelude::*;

use crate::gateway::Backend;

/// Characters left alone inside a single path segment or query value
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one path segment
pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Validated base URLs of the practice and suggestor backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    practice: String,
    suggestor: String,
}

impl Endpoints {
    /// Both URLs must be absolute http(s) URLs. Trailing slashes are dropped.
    pub fn new(practice: &str, suggestor: &str) -> Result<Self> {
        Ok(Self {
            practice: validate_base(practice)?,
            suggestor: validate_base(suggestor)?,
        })
    }

    pub fn base(&self, backend: Backend) -> &str {
        match backend {
            Backend::Practice => &self.practice,
            Backend::Suggestor => &self.suggestor,
        }
    }

    pub fn health(&self, backend: Backend) -> String {
        format!("{}/api/health", self.base(backend))
    }

    pub fn problems(&self) -> String {
        format!("{}/api/problems", self.practice)
    }

    pub fn problem(&self, id: &str) -> String {
        format!("{}/api/problems/{}", self.practice, encode_segment(id))
    }

    pub fn next_problem(&self, id: &str) -> String {
        format!("{}/next", self.problem(id))
    }

    pub fn hint(&self, id: &str) -> String {
        format!("{}/hint", self.problem(id))
    }

    pub fn solution(&self, id: &str) -> String {
        format!("{}/solution", self.problem(id))
    }

    /// `?tables=a,b` with each name encoded and the separators kept literal
    pub fn schema(&self, tables: &[String]) -> String {
        let joined = tables
            .iter()
            .map(|t| encode_segment(t))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}/api/schema?tables={}", self.practice, joined)
    }

    pub fn run(&self) -> String {
        format!("{}/api/run", self.practice)
    }

    pub fn grade(&self) -> String {
        format!("{}/api/grade", self.practice)
    }

    pub fn genres(&self) -> String {
        format!("{}/api/genres", self.suggestor)
    }

    pub fn actors(&self) -> String {
        format!("{}/api/actors", self.suggestor)
    }

    pub fn actor(&self, id: &str) -> String {
        format!("{}/api/actors/{}", self.suggestor, encode_segment(id))
    }

    pub fn movies(&self) -> String {
        format!("{}/api/movies", self.suggestor)
    }

    pub fn movie(&self, id: &str) -> String {
        format!("{}/api/movies/{}", self.suggestor, encode_segment(id))
    }
}

fn validate_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| Error::config_invalid(format!("invalid URL '{}': {}", trimmed, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(Error::config_invalid(format!(
            "unsupported scheme '{}' in '{}'",
            other, trimmed
        ))),
    }
}
