//! Backend gateway contract
//!
//! This module provides the ApiGateway trait, the single seam between the
//! session controllers and the two backends. The HTTP client implements it
//! for real runs; the scripted gateway in `test_utils` implements it for
//! tests.

use std::fmt;

use sqlbench_core::prelude::*;
use sqlbench_core::{
    ActorDetail, ActorSuggestion, GradeOutcome, MovieDetail, MovieSummary, Problem, Row,
    SchemaInfo,
};

use crate::protocol::{HealthReport, MovieQuery};

/// Which backend a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Problems, schema, query execution and grading
    Practice,
    /// Genres, actors and movies
    Suggestor,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Practice => f.write_str("practice"),
            Backend::Suggestor => f.write_str("suggestor"),
        }
    }
}

/// Backend operations used by the session controllers
///
/// Every method is one request/response exchange. Errors are already mapped
/// into the core taxonomy: a message sent by the backend surfaces verbatim as
/// [`Error::Backend`], everything else as transport/http/protocol errors.
#[trait_variant::make(ApiGateway: Send)]
pub trait LocalApiGateway {
    // ─────────────────────────────────────────────────────────────
    // Practice backend
    // ─────────────────────────────────────────────────────────────

    /// All problems, in backend order
    async fn list_problems(&self) -> Result<Vec<Problem>>;

    async fn get_problem(&self, id: &str) -> Result<Problem>;

    /// The problem after `id`, if any
    async fn get_next_problem_id(&self, id: &str) -> Result<Option<String>>;

    /// Column metadata for `tables`. An empty slice yields an empty schema
    /// without contacting the backend.
    async fn get_schema(&self, tables: &[String]) -> Result<SchemaInfo>;

    /// Clause keywords the reference solution uses
    async fn get_hint(&self, id: &str) -> Result<Vec<String>>;

    async fn get_solution(&self, id: &str) -> Result<String>;

    /// Execute a read-only query
    async fn run_query(&self, sql: &str) -> Result<Vec<Row>>;

    async fn grade(&self, problem_id: &str, sql: &str) -> Result<GradeOutcome>;

    // ─────────────────────────────────────────────────────────────
    // Suggestor backend
    // ─────────────────────────────────────────────────────────────

    async fn list_genres(&self) -> Result<Vec<String>>;

    /// Ranked actor suggestions for a name prefix
    async fn search_actors(&self, name: &str, limit: usize) -> Result<Vec<ActorSuggestion>>;

    async fn search_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>>;

    async fn get_movie(&self, id: &str) -> Result<MovieDetail>;

    async fn get_actor(&self, id: &str) -> Result<ActorDetail>;

    /// Liveness probe for one backend
    async fn health(&self, backend: Backend) -> Result<HealthReport>;
}
