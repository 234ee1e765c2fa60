//! Test utilities for gateway consumers
//!
//! Provides [`ScriptedGateway`], an in-memory [`ApiGateway`] that answers
//! from per-operation reply queues and records every call. Replies can be
//! held until the test releases them, which is how out-of-order delivery is
//! simulated.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

use sqlbench_core::prelude::*;
use sqlbench_core::{
    ActorDetail, ActorSuggestion, Difficulty, GradeOutcome, MovieDetail, MovieSummary, Problem,
    Row, SchemaInfo,
};

use crate::gateway::{ApiGateway, Backend};
use crate::protocol::{HealthReport, MovieQuery};

/// Gateway operation, used as the reply queue key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListProblems,
    GetProblem,
    NextProblemId,
    Schema,
    Hint,
    Solution,
    RunQuery,
    Grade,
    ListGenres,
    SearchActors,
    SearchMovies,
    GetMovie,
    GetActor,
    Health,
}

/// A recorded gateway call with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListProblems,
    GetProblem(String),
    NextProblemId(String),
    Schema(Vec<String>),
    Hint(String),
    Solution(String),
    RunQuery(String),
    Grade { problem_id: String, sql: String },
    ListGenres,
    SearchActors { name: String, limit: usize },
    SearchMovies(MovieQuery),
    GetMovie(String),
    GetActor(String),
    Health(Backend),
}

impl GatewayCall {
    pub fn op(&self) -> Op {
        match self {
            GatewayCall::ListProblems => Op::ListProblems,
            GatewayCall::GetProblem(_) => Op::GetProblem,
            GatewayCall::NextProblemId(_) => Op::NextProblemId,
            GatewayCall::Schema(_) => Op::Schema,
            GatewayCall::Hint(_) => Op::Hint,
            GatewayCall::Solution(_) => Op::Solution,
            GatewayCall::RunQuery(_) => Op::RunQuery,
            GatewayCall::Grade { .. } => Op::Grade,
            GatewayCall::ListGenres => Op::ListGenres,
            GatewayCall::SearchActors { .. } => Op::SearchActors,
            GatewayCall::SearchMovies(_) => Op::SearchMovies,
            GatewayCall::GetMovie(_) => Op::GetMovie,
            GatewayCall::GetActor(_) => Op::GetActor,
            GatewayCall::Health(_) => Op::Health,
        }
    }
}

/// Releases a held reply. Dropping it releases too.
#[derive(Debug)]
pub struct Release(oneshot::Sender<()>);

impl Release {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

#[derive(Debug)]
struct Reply {
    result: std::result::Result<Value, String>,
    hold: Option<oneshot::Receiver<()>>,
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<Op, VecDeque<Reply>>,
    calls: Vec<GatewayCall>,
}

/// In-memory gateway answering from scripted replies.
///
/// Replies are popped in call order per operation. An `Err(message)` reply
/// surfaces as [`Error::Backend`] with that message. A call with no scripted
/// reply fails with a transport error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGateway {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an immediate reply for `op`
    pub fn push<T: Serialize>(&self, op: Op, result: std::result::Result<T, &str>) {
        self.enqueue(op, result, None);
    }

    /// Queue a reply for `op` that is only delivered once released
    pub fn push_held<T: Serialize>(&self, op: Op, result: std::result::Result<T, &str>) -> Release {
        let (tx, rx) = oneshot::channel();
        self.enqueue(op, result, Some(rx));
        Release(tx)
    }

    fn enqueue<T: Serialize>(
        &self,
        op: Op,
        result: std::result::Result<T, &str>,
        hold: Option<oneshot::Receiver<()>>,
    ) {
        let result = match result {
            Ok(value) => Ok(serde_json::to_value(value).expect("scripted reply must serialize")),
            Err(message) => Err(message.to_string()),
        };
        self.lock()
            .replies
            .entry(op)
            .or_default()
            .push_back(Reply { result, hold });
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    /// Calls of one operation, in order
    pub fn calls_of(&self, op: Op) -> Vec<GatewayCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn answer<T: DeserializeOwned>(&self, call: GatewayCall) -> Result<T> {
        let op = call.op();
        // Pop synchronously so replies map to calls in call order
        let reply = {
            let mut script = self.lock();
            script.calls.push(call);
            script.replies.get_mut(&op).and_then(VecDeque::pop_front)
        };
        let Some(reply) = reply else {
            return Err(Error::transport(format!("no scripted reply for {:?}", op)));
        };
        if let Some(hold) = reply.hold {
            let _ = hold.await;
        }
        match reply.result {
            Ok(value) => serde_json::from_value(value).map_err(|e| Error::protocol(e.to_string())),
            Err(message) => Err(Error::backend(message)),
        }
    }
}

impl ApiGateway for ScriptedGateway {
    async fn list_problems(&self) -> Result<Vec<Problem>> {
        self.answer(GatewayCall::ListProblems).await
    }

    async fn get_problem(&self, id: &str) -> Result<Problem> {
        self.answer(GatewayCall::GetProblem(id.to_string())).await
    }

    async fn get_next_problem_id(&self, id: &str) -> Result<Option<String>> {
        self.answer(GatewayCall::NextProblemId(id.to_string())).await
    }

    async fn get_schema(&self, tables: &[String]) -> Result<SchemaInfo> {
        if tables.is_empty() {
            return Ok(SchemaInfo::default());
        }
        self.answer(GatewayCall::Schema(tables.to_vec())).await
    }

    async fn get_hint(&self, id: &str) -> Result<Vec<String>> {
        self.answer(GatewayCall::Hint(id.to_string())).await
    }

    async fn get_solution(&self, id: &str) -> Result<String> {
        self.answer(GatewayCall::Solution(id.to_string())).await
    }

    async fn run_query(&self, sql: &str) -> Result<Vec<Row>> {
        self.answer(GatewayCall::RunQuery(sql.to_string())).await
    }

    async fn grade(&self, problem_id: &str, sql: &str) -> Result<GradeOutcome> {
        self.answer(GatewayCall::Grade {
            problem_id: problem_id.to_string(),
            sql: sql.to_string(),
        })
        .await
    }

    async fn list_genres(&self) -> Result<Vec<String>> {
        self.answer(GatewayCall::ListGenres).await
    }

    async fn search_actors(&self, name: &str, limit: usize) -> Result<Vec<ActorSuggestion>> {
        self.answer(GatewayCall::SearchActors {
            name: name.to_string(),
            limit,
        })
        .await
    }

    async fn search_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>> {
        self.answer(GatewayCall::SearchMovies(query.clone())).await
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetail> {
        self.answer(GatewayCall::GetMovie(id.to_string())).await
    }

    async fn get_actor(&self, id: &str) -> Result<ActorDetail> {
        self.answer(GatewayCall::GetActor(id.to_string())).await
    }

    async fn health(&self, backend: Backend) -> Result<HealthReport> {
        self.answer(GatewayCall::Health(backend)).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// Creates a test problem over the given tables.
pub fn test_problem(id: &str, tables: &[&str]) -> Problem {
    Problem {
        id: id.to_string(),
        title: format!("Problem {}", id),
        description: format!("Description of {}", id),
        difficulty: Difficulty::Easy,
        tables: tables.iter().map(|t| t.to_string()).collect(),
        starter_sql: None,
    }
}

/// Creates a test actor suggestion.
pub fn test_actor(id: &str, name: &str) -> ActorSuggestion {
    ActorSuggestion {
        id: id.to_string(),
        name: name.to_string(),
        birth_year: None,
    }
}

/// Creates a test movie summary.
pub fn test_movie(id: &str, title: &str) -> MovieSummary {
    MovieSummary {
        id: id.to_string(),
        title: title.to_string(),
        year: Some(1994),
        genres: Some("Drama".to_string()),
        rating: Some(8.0),
        votes: Some(1000),
    }
}

/// Creates `count` movies with ids `tt0`, `tt1`, ...
pub fn test_movies(count: usize) -> Vec<MovieSummary> {
    (0..count)
        .map(|i| test_movie(&format!("tt{}", i), &format!("Movie {}", i)))
        .collect()
}

/// Creates a single-row result.
pub fn test_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Row::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_and_calls_recorded() {
        let gw = ScriptedGateway::new();
        gw.push(Op::Solution, Ok("SELECT 1"));
        gw.push::<String>(Op::Solution, Err("boom"));

        assert_eq!(gw.get_solution("p1").await.unwrap(), "SELECT 1");
        let err = gw.get_solution("p1").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(gw.call_count(Op::Solution), 2);
    }

    #[tokio::test]
    async fn test_missing_reply_is_transport_error() {
        let gw = ScriptedGateway::new();
        let err = gw.get_hint("p1").await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert_eq!(gw.calls(), vec![GatewayCall::Hint("p1".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_schema_request_is_not_recorded() {
        let gw = ScriptedGateway::new();
        let schema = gw.get_schema(&[]).await.unwrap();
        assert!(schema.is_empty());
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn test_held_reply_waits_for_release() {
        let gw = ScriptedGateway::new();
        let release = gw.push_held(Op::GetProblem, Ok(test_problem("p1", &[])));

        let task = {
            let gw = gw.clone();
            tokio::spawn(async move { gw.get_problem("p1").await })
        };
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        release.release();
        let problem = task.await.unwrap().unwrap();
        assert_eq!(problem.id, "p1");
    }
}
