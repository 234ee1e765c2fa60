//! sqlbench - IMDb SQL practice workbench and movie suggestor
//!
//! The binary drives the session engine from `sqlbench-app` in headless
//! mode: line commands on stdin, NDJSON events on stdout.

pub mod check;
pub mod headless;

pub use check::{check_backends, BackendStatus};
pub use headless::runner::run_headless;
