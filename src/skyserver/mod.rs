//! SkyServer query layer.
//!
//! Provides a trait-based interface for submitting SQL to a remote tabular
//! query service, so the HTTP client can be swapped for a stub in tests.

mod http;
mod mock;
pub mod sql;
mod types;

pub use http::{parse_csv_response, SkyServerClient, DEFAULT_SKYSERVER_URL, DEFAULT_TIMEOUT_SECS};
pub use mock::{FailingQueryService, MockQueryService};
pub use types::{QueryResult, Row};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for query services.
///
/// The executor submits the caller's SQL verbatim and reproduces the
/// service's column and row order exactly. It never retries.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Executes a SQL query and returns the tabular result.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;
}
