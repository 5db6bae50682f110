//! Mock transports for testing the spectrum fetcher.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, SloanyError};
use crate::spectra::transport::{FileResponse, FileTransport};

/// A transport that serves scripted responses and records every request.
pub struct MockTransport {
    responses: HashMap<String, FileResponse>,
    fallback: FileResponse,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Creates a transport that answers every URL with 404.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fallback: FileResponse::status(404),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a transport that answers every URL with the given response.
    pub fn answering_all(fallback: FileResponse) -> Self {
        Self {
            fallback,
            ..Self::new()
        }
    }

    /// Scripts a response for one exact URL.
    pub fn respond(mut self, url: impl Into<String>, response: FileResponse) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    /// Returns the URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns how many GETs have been issued.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<FileResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// A transport that fails every request at the network level.
pub struct FailingTransport {
    message: String,
    requests: Mutex<Vec<String>>,
}

impl FailingTransport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns how many GETs were attempted.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FileTransport for FailingTransport {
    async fn get(&self, url: &str) -> Result<FileResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        Err(SloanyError::transport(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_and_fallback_responses() {
        let transport = MockTransport::new().respond("http://sas/a.fits", FileResponse::ok("A"));

        let hit = transport.get("http://sas/a.fits").await.unwrap();
        assert_eq!(hit.status, 200);
        assert_eq!(hit.bytes, b"A");

        let miss = transport.get("http://sas/b.fits").await.unwrap();
        assert_eq!(miss.status, 404);

        assert_eq!(transport.request_count(), 2);
        assert_eq!(
            transport.requests(),
            vec!["http://sas/a.fits", "http://sas/b.fits"]
        );
    }

    #[tokio::test]
    async fn test_failing_transport() {
        let transport = FailingTransport::new("dns failure");
        let err = transport.get("http://sas/a.fits").await.unwrap_err();
        assert!(matches!(err, SloanyError::Transport(_)));
        assert_eq!(transport.request_count(), 1);
    }
}
