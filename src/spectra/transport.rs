//! HTTP transport seam for spectrum downloads.
//!
//! The fetcher talks to the Science Archive Server through this trait so
//! tests can script responses per URL without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Result, SloanyError};

/// One HTTP response: status code plus body bytes.
#[derive(Debug, Clone)]
pub struct FileResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl FileResponse {
    /// Creates a 200 response with the given body.
    pub fn ok(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            bytes: bytes.into(),
        }
    }

    /// Creates a bodiless response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            bytes: Vec::new(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for issuing a single GET against a candidate URL.
///
/// An `Err` is a network-level failure (DNS, refused connection, timeout);
/// an HTTP error status is an `Ok` response with that status.
#[async_trait]
pub trait FileTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<FileResponse>;
}

/// Production transport over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sloany/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SloanyError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FileTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<FileResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SloanyError::transport(format!("GET {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SloanyError::transport(format!("failed to read body of {url}: {e}")))?;

        Ok(FileResponse {
            status,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success_range() {
        assert!(FileResponse::ok(b"fits".as_slice()).is_success());
        assert!(FileResponse::status(204).is_success());
        assert!(!FileResponse::status(404).is_success());
        assert!(!FileResponse::status(500).is_success());
    }

    #[test]
    fn test_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(30)).is_ok());
    }
}
