//! HTTP client for the SkyServer CSV query endpoint.
//!
//! Submits the SQL text as-is via `GET ?cmd=<sql>&format=csv` and parses the
//! CSV body into a [`QueryResult`]. Column and row order are preserved
//! exactly as returned; cells stay text.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{Result, SloanyError};
use crate::skyserver::{QueryResult, QueryService};

/// Public SkyServer DR9 SQL search endpoint.
pub const DEFAULT_SKYSERVER_URL: &str =
    "http://skyserver.sdss3.org/public/en/tools/search/x_sql.asp";

/// Default HTTP timeout for query submission.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// SkyServer query client.
#[derive(Debug, Clone)]
pub struct SkyServerClient {
    client: Client,
    url: String,
}

impl SkyServerClient {
    /// Creates a client for the given endpoint URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        Url::parse(&url)
            .map_err(|e| SloanyError::config(format!("invalid skyserver URL '{url}': {e}")))?;

        let client = Client::builder()
            .user_agent(concat!("sloany/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SloanyError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl QueryService for SkyServerClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        debug!(url = %self.url, "submitting query");

        let response = self
            .client
            .get(&self.url)
            .query(&[("cmd", sql), ("format", "csv")])
            .send()
            .await
            .map_err(|e| SloanyError::query(format!("could not reach SkyServer: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SloanyError::query(format!(
                "SkyServer answered with status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SloanyError::query(format!("failed to read response body: {e}")))?;

        let (columns, cells) = parse_csv_response(&body)?;
        let execution_time = start.elapsed();
        debug!(rows = cells.len(), ?execution_time, "query complete");

        Ok(QueryResult::with_data(columns, cells).with_execution_time(execution_time))
    }
}

/// Parses a SkyServer CSV body: first line column names, remaining lines rows.
///
/// Every data line must carry exactly as many fields as the header; a
/// mismatch means the response is malformed and surfaces as a query error.
pub fn parse_csv_response(body: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(SloanyError::query("SkyServer returned an empty response"));
    }

    let mut lines = trimmed.lines().map(|line| line.trim_end_matches('\r'));
    let header = lines
        .next()
        .ok_or_else(|| SloanyError::query("SkyServer returned an empty response"))?;
    let columns: Vec<String> = header.split(',').map(str::to_string).collect();

    let mut cells = Vec::new();
    for (i, line) in lines.enumerate() {
        let fields: Vec<String> = line.split(',').map(str::to_string).collect();
        if fields.len() != columns.len() {
            return Err(SloanyError::query(format!(
                "malformed response: row {} has {} fields, header has {}",
                i + 1,
                fields.len(),
                columns.len()
            )));
        }
        cells.push(fields);
    }

    Ok((columns, cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_preserves_column_and_row_order() {
        let body = "mjd,plate,fiberid\n55742,4724,734\n55361,4077,709\n";
        let (columns, cells) = parse_csv_response(body).unwrap();
        assert_eq!(columns, vec!["mjd", "plate", "fiberid"]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], vec!["55742", "4724", "734"]);
        assert_eq!(cells[1], vec!["55361", "4077", "709"]);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let body = "plate,mjd\r\n4075,55352\r\n";
        let (columns, cells) = parse_csv_response(body).unwrap();
        assert_eq!(columns, vec!["plate", "mjd"]);
        assert_eq!(cells, vec![vec!["4075", "55352"]]);
    }

    #[test]
    fn test_parse_header_only() {
        let (columns, cells) = parse_csv_response("plate,mjd,fiberid\n").unwrap();
        assert_eq!(columns.len(), 3);
        assert!(cells.is_empty());
    }

    #[test]
    fn test_parse_empty_body_is_query_error() {
        let err = parse_csv_response("  \n ").unwrap_err();
        assert!(matches!(err, SloanyError::Query(_)));
    }

    #[test]
    fn test_parse_field_count_mismatch_is_query_error() {
        let err = parse_csv_response("plate,mjd\n4075,55352,802\n").unwrap_err();
        assert!(matches!(err, SloanyError::Query(_)));
        assert!(err.to_string().contains("3 fields"));
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let err = SkyServerClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SloanyError::Config(_)));
    }
}
