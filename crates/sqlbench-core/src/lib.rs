//! # sqlbench-core - Core Domain Types
//!
//! Foundation crate for sqlbench. Provides domain types, error handling,
//! logging setup and the pure helpers the session controllers derive their
//! views with.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Problem`], [`Difficulty`] - Practice problems
//! - [`SchemaInfo`], [`ColumnDescriptor`] - Per-problem table metadata
//! - [`GradeOutcome`] - Result of checking a query
//! - [`ActorSuggestion`], [`MovieSummary`], [`MovieDetail`], [`ActorDetail`] - Suggestor projections
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Helpers
//! - [`format_sql()`] - Idempotent auto-format
//! - [`ResultTable`] - Column/row derivation for query results
//! - [`group_by_difficulty()`] - Catalog grouping
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use sqlbench_core::prelude::*;
//! ```

pub mod catalog;
pub mod error;
pub mod logging;
pub mod results;
pub mod sql_format;
pub mod types;

/// Prelude for common imports used throughout all sqlbench crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use catalog::{group_by_difficulty, DifficultyGroup};
pub use error::{Error, Result, ResultExt};
pub use results::{display_cell, visible_columns, ResultTable, HIDDEN_COLUMNS, MAX_RENDERED_ROWS};
pub use sql_format::{format_sql, is_blank};
pub use types::{
    ActorDetail, ActorSuggestion, CastMember, ColumnDescriptor, Difficulty, FilmCredit,
    GradeOutcome, MovieDetail, MovieSummary, Problem, Row, SchemaInfo,
};
