//! HTTP implementation of the gateway

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use sqlbench_core::prelude::*;
use sqlbench_core::{
    ActorDetail, ActorSuggestion, GradeOutcome, MovieDetail, MovieSummary, Problem, Row,
    SchemaInfo,
};

use crate::endpoints::Endpoints;
use crate::gateway::{ApiGateway, Backend};
use crate::protocol::{
    ErrorBody, GenresResponse, GradeRequest, GradeResponse, HealthReport, HintResponse,
    ItemsResponse, MovieQuery, NextIdResponse, RunRequest, RunResponse, SchemaResponse,
    SolutionResponse,
};

/// Gateway speaking JSON over HTTP to both backends.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoints: Arc<Endpoints>,
}

impl HttpGateway {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoints: Arc::new(endpoints),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        trace!("GET {}", url);
        let response = self.client.get(&url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn get_json_with<T: DeserializeOwned>(
        &self,
        url: String,
        params: &[(&str, String)],
    ) -> Result<T> {
        trace!("GET {} {:?}", url, params);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: String, body: &B) -> Result<T> {
        trace!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

fn transport(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::transport("request timed out")
    } else {
        Error::transport(e.to_string())
    }
}

/// Map a response into `T`, surfacing `{ "error": ... }` bodies verbatim.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;

    if !status.is_success() {
        return Err(match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) if !error.trim().is_empty() => Error::backend(error),
            _ => Error::http(status.as_u16()),
        });
    }

    serde_json::from_slice(&body).map_err(|e| Error::protocol(e.to_string()))
}

impl ApiGateway for HttpGateway {
    async fn list_problems(&self) -> Result<Vec<Problem>> {
        self.get_json(self.endpoints.problems()).await
    }

    async fn get_problem(&self, id: &str) -> Result<Problem> {
        self.get_json(self.endpoints.problem(id)).await
    }

    async fn get_next_problem_id(&self, id: &str) -> Result<Option<String>> {
        let resp: NextIdResponse = self.get_json(self.endpoints.next_problem(id)).await?;
        Ok(resp.into_next_id())
    }

    async fn get_schema(&self, tables: &[String]) -> Result<SchemaInfo> {
        if tables.is_empty() {
            return Ok(SchemaInfo::default());
        }
        let resp: SchemaResponse = self.get_json(self.endpoints.schema(tables)).await?;
        Ok(resp.into_schema())
    }

    async fn get_hint(&self, id: &str) -> Result<Vec<String>> {
        let resp: HintResponse = self.get_json(self.endpoints.hint(id)).await?;
        Ok(resp.verbs)
    }

    async fn get_solution(&self, id: &str) -> Result<String> {
        let resp: SolutionResponse = self.get_json(self.endpoints.solution(id)).await?;
        Ok(resp.sql)
    }

    async fn run_query(&self, sql: &str) -> Result<Vec<Row>> {
        let resp: RunResponse = self
            .post_json(self.endpoints.run(), &RunRequest { sql })
            .await?;
        resp.into_result()
    }

    async fn grade(&self, problem_id: &str, sql: &str) -> Result<GradeOutcome> {
        let resp: GradeResponse = self
            .post_json(self.endpoints.grade(), &GradeRequest { problem_id, sql })
            .await?;
        resp.into_result()
    }

    async fn list_genres(&self) -> Result<Vec<String>> {
        let resp: GenresResponse = self.get_json(self.endpoints.genres()).await?;
        Ok(resp.into_names())
    }

    async fn search_actors(&self, name: &str, limit: usize) -> Result<Vec<ActorSuggestion>> {
        let params = [("q", name.to_string()), ("limit", limit.to_string())];
        let resp: ItemsResponse<ActorSuggestion> = self
            .get_json_with(self.endpoints.actors(), &params)
            .await?;
        Ok(resp.items)
    }

    async fn search_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>> {
        let resp: ItemsResponse<MovieSummary> = self
            .get_json_with(self.endpoints.movies(), &query.to_params())
            .await?;
        Ok(resp.items)
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetail> {
        self.get_json(self.endpoints.movie(id)).await
    }

    async fn get_actor(&self, id: &str) -> Result<ActorDetail> {
        self.get_json(self.endpoints.actor(id)).await
    }

    async fn health(&self, backend: Backend) -> Result<HealthReport> {
        self.get_json(self.endpoints.health(backend)).await
    }
}
