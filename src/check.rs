//! `--check`: probe both backends once and report

use sqlbench_api::{ApiGateway, Backend};
use tracing::{info, warn};

/// Outcome of probing one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStatus {
    pub backend: Backend,
    /// `Ok(status)` as reported, or the request error
    pub result: std::result::Result<String, String>,
}

impl BackendStatus {
    pub fn is_ok(&self) -> bool {
        matches!(&self.result, Ok(status) if status.eq_ignore_ascii_case("ok"))
    }
}

/// Probe the practice and suggestor backends concurrently
pub async fn check_backends<G: ApiGateway>(gateway: &G) -> Vec<BackendStatus> {
    let (practice, suggestor) = tokio::join!(
        gateway.health(Backend::Practice),
        gateway.health(Backend::Suggestor)
    );

    [(Backend::Practice, practice), (Backend::Suggestor, suggestor)]
        .into_iter()
        .map(|(backend, result)| {
            let result = result.map(|report| report.status).map_err(|e| e.to_string());
            match &result {
                Ok(status) => info!("{} backend health: {}", backend, status),
                Err(e) => warn!("{} backend unreachable: {}", backend, e),
            }
            BackendStatus { backend, result }
        })
        .collect()
}
