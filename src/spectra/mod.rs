//! Spectrum retrieval layer.
//!
//! Given one query result row, derives the candidate file locations in
//! priority order and fetches the first one that exists. The fetcher never
//! writes to disk; it hands bytes back to the caller.

mod fetch_loop;
mod mock;
pub mod transport;
pub mod urls;

pub use fetch_loop::{
    fetch_all, ArtifactSink, DirectorySink, FetchDecision, FetchPlan, FetchSummary, MemorySink,
};
pub use mock::{FailingTransport, MockTransport};
pub use transport::{FileResponse, FileTransport, HttpTransport};
pub use urls::{default_templates, spec_filename, SpectrumId, UrlTemplate, DEFAULT_SAS_BASE_URL};

use tracing::{debug, warn};

use crate::error::{Result, SloanyError};
use crate::skyserver::Row;

/// Outcome of fetching one spectrum.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The spectrum was found; `url` is the candidate that answered.
    Success { url: String, bytes: Vec<u8> },

    /// Every candidate answered with a non-success status.
    ///
    /// This is a normal outcome, not an error: the caller reports it and
    /// moves on to the next row.
    NotFound { attempted: Vec<String> },
}

/// Fetches spectrum files by trying an ordered list of candidate URLs.
pub struct SpectrumFetcher<T> {
    transport: T,
    base_url: String,
    templates: Vec<UrlTemplate>,
}

impl<T: FileTransport> SpectrumFetcher<T> {
    /// Creates a fetcher with the default SAS base URL and candidate order.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_SAS_BASE_URL.to_string(),
            templates: default_templates(),
        }
    }

    /// Overrides the SAS base URL (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the candidate template list.
    pub fn with_templates(mut self, templates: Vec<UrlTemplate>) -> Self {
        self.templates = templates;
        self
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Derives the candidate URLs for one spectrum, in priority order.
    pub fn candidate_urls(&self, id: &SpectrumId) -> Vec<String> {
        self.templates
            .iter()
            .map(|tpl| tpl(&self.base_url, id))
            .collect()
    }

    /// Fetches the spectrum named by `row`.
    ///
    /// Candidates are probed strictly in order; the first success wins. A
    /// non-success status falls through to the next candidate. `NotFound`
    /// requires a definitive non-success status from every candidate; if any
    /// candidate failed at the network level and none succeeded, the row
    /// surfaces a transport error instead.
    pub async fn fetch(&self, row: &Row) -> Result<FetchOutcome> {
        let id = SpectrumId::from_row(row)?;
        let mut attempted = Vec::with_capacity(self.templates.len());
        let mut last_transport_error = None;

        for url in self.candidate_urls(&id) {
            match self.transport.get(&url).await {
                Ok(response) if response.is_success() => {
                    debug!(%url, bytes = response.bytes.len(), "spectrum found");
                    return Ok(FetchOutcome::Success {
                        url,
                        bytes: response.bytes,
                    });
                }
                Ok(response) => {
                    debug!(%url, status = response.status, "candidate miss");
                    attempted.push(url);
                }
                Err(e) => {
                    warn!(%url, error = %e, "candidate unreachable");
                    attempted.push(url);
                    last_transport_error = Some(e);
                }
            }
        }

        match last_transport_error {
            Some(e) => Err(SloanyError::transport(format!(
                "no candidate for {} was reachable: {e}",
                id.filename()
            ))),
            None => Ok(FetchOutcome::NotFound { attempted }),
        }
    }
}
