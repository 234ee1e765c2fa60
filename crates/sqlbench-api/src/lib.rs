//! # sqlbench-api - Backend Gateway
//!
//! The request/response contract with the practice and suggestor backends,
//! plus an HTTP implementation of it.
//!
//! Depends on [`sqlbench_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Contract
//! - [`ApiGateway`] - Async trait implemented by every gateway
//! - [`Backend`] - Practice vs suggestor addressing
//!
//! ### HTTP
//! - [`HttpGateway`] - `reqwest`-based implementation
//! - [`Endpoints`] - Validated base URLs and path construction
//!
//! ### Protocol
//! - [`MovieQuery`] - Movie page filters
//! - [`HealthReport`] - Health probe response
//!
//! ### Testing
//! - `test_utils::ScriptedGateway` (behind the `test-helpers` feature)

pub mod client;
pub mod endpoints;
pub mod gateway;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::HttpGateway;
pub use endpoints::{encode_segment, Endpoints};
pub use gateway::{ApiGateway, Backend, LocalApiGateway};
pub use protocol::{HealthReport, MovieQuery};
