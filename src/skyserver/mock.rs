//! Mock query services for testing.
//!
//! Provide canned tabular results (or failures) without touching the network.

use async_trait::async_trait;

use crate::error::{Result, SloanyError};
use crate::skyserver::{QueryResult, QueryService};

/// A query service that returns a predefined result for every query.
pub struct MockQueryService {
    result: QueryResult,
}

impl MockQueryService {
    /// Creates a mock service returning an empty result.
    pub fn new() -> Self {
        Self {
            result: QueryResult::default(),
        }
    }

    /// Creates a mock service returning the given columns and rows.
    pub fn with_table(columns: Vec<String>, cells: Vec<Vec<String>>) -> Self {
        Self {
            result: QueryResult::with_data(columns, cells),
        }
    }
}

impl Default for MockQueryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryService for MockQueryService {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Ok(self.result.clone())
    }
}

/// A query service that fails every query with the given message.
pub struct FailingQueryService {
    message: String,
}

impl FailingQueryService {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl QueryService for FailingQueryService {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(SloanyError::query(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_table() {
        let service = MockQueryService::with_table(
            vec!["plate".into(), "mjd".into()],
            vec![vec!["4075".into(), "55352".into()]],
        );
        let result = service.execute_query("select 1").await.unwrap();
        assert_eq!(result.row_count, 1);
        assert_eq!(result.rows[0].get("plate"), Some("4075"));
    }

    #[tokio::test]
    async fn test_failing_service() {
        let service = FailingQueryService::new("boom");
        let err = service.execute_query("select 1").await.unwrap_err();
        assert!(matches!(err, SloanyError::Query(_)));
    }
}
