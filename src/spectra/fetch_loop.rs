//! Sequential fetch loop over a query result.
//!
//! Rows are processed one at a time in row order. Confirmation comes from a
//! caller-supplied decision function and persistence goes through the
//! [`ArtifactSink`] trait, so the loop runs in tests without a terminal or a
//! filesystem.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{Result, SloanyError};
use crate::skyserver::QueryResult;
use crate::spectra::transport::FileTransport;
use crate::spectra::urls::SpectrumId;
use crate::spectra::{FetchOutcome, SpectrumFetcher};

/// What the user decided to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// Fetch every spectrum, overwriting existing files.
    All,
    /// Fetch only spectra not already present in the sink.
    MissingOnly,
    /// Fetch nothing.
    Nothing,
}

/// What a run is about to fetch, handed to the decision function.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// Spectrum filenames for the resolvable rows, in row order.
    pub filenames: Vec<String>,
    /// Subset of `filenames` already present in the sink.
    pub existing: Vec<String>,
    /// Number of rows that could not name a spectrum file.
    pub malformed: usize,
}

/// Destination for fetched artifacts.
pub trait ArtifactSink {
    /// Returns true if an artifact with this filename is already present.
    fn exists(&self, filename: &str) -> bool;

    /// Persists one artifact.
    fn write(&mut self, filename: &str, bytes: &[u8]) -> Result<()>;
}

/// Sink writing artifacts into a directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates the sink, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl ArtifactSink for DirectorySink {
    fn exists(&self, filename: &str) -> bool {
        self.dir.join(filename).exists()
    }

    fn write(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        fs::write(self.dir.join(filename), bytes)?;
        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates an artifact, as if fetched by an earlier run.
    pub fn preload(mut self, filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(filename.into(), bytes.into());
        self
    }

    /// Returns the stored artifacts.
    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }
}

impl ArtifactSink for MemorySink {
    fn exists(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    fn write(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        self.files.insert(filename.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Accounting for one fetch run.
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Rows in the query result.
    pub total: usize,
    /// Spectra fetched and persisted.
    pub fetched: usize,
    /// Filenames absent from every candidate location.
    pub not_found: Vec<String>,
    /// Filenames whose candidates were all unreachable.
    pub failed: Vec<String>,
    /// Error messages for rows that could not name a spectrum.
    pub malformed: Vec<String>,
    /// Spectra skipped because they were already present.
    pub skipped_existing: usize,
    /// True if the decision function declined the whole run.
    pub declined: bool,
}

impl FetchSummary {
    /// The user-facing closing line, e.g. `8 of 10 spectra fetched`.
    pub fn report_line(&self) -> String {
        format!("{} of {} spectra fetched", self.fetched, self.total)
    }
}

/// Fetches the spectra for every row of `result`, strictly in row order.
///
/// `decide` is consulted once, with the full plan, before anything is
/// fetched. Malformed rows and per-row transport failures are recorded in
/// the summary and the loop continues; only sink failures abort the run.
pub async fn fetch_all<T, F>(
    fetcher: &SpectrumFetcher<T>,
    result: &QueryResult,
    sink: &mut dyn ArtifactSink,
    decide: F,
) -> Result<FetchSummary>
where
    T: FileTransport,
    F: FnOnce(&FetchPlan) -> FetchDecision,
{
    let mut summary = FetchSummary {
        total: result.rows.len(),
        ..FetchSummary::default()
    };

    // Resolve filenames up front so the decision function sees the full plan.
    let mut names: Vec<Option<String>> = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        match SpectrumId::from_row(row) {
            Ok(id) => names.push(Some(id.filename())),
            Err(e) => {
                warn!(error = %e, "skipping row");
                summary.malformed.push(e.to_string());
                names.push(None);
            }
        }
    }

    let plan = FetchPlan {
        filenames: names.iter().flatten().cloned().collect(),
        existing: names
            .iter()
            .flatten()
            .filter(|name| sink.exists(name))
            .cloned()
            .collect(),
        malformed: summary.malformed.len(),
    };

    let skip: HashSet<String> = match decide(&plan) {
        FetchDecision::Nothing => {
            summary.declined = true;
            return Ok(summary);
        }
        FetchDecision::All => HashSet::new(),
        FetchDecision::MissingOnly => plan.existing.iter().cloned().collect(),
    };

    for (row, name) in result.rows.iter().zip(&names) {
        let Some(filename) = name else {
            continue;
        };
        if skip.contains(filename) {
            summary.skipped_existing += 1;
            continue;
        }

        match fetcher.fetch(row).await {
            Ok(FetchOutcome::Success { url, bytes }) => {
                info!(%filename, %url, "fetched spectrum");
                sink.write(filename, &bytes)?;
                summary.fetched += 1;
            }
            Ok(FetchOutcome::NotFound { attempted }) => {
                warn!(%filename, tried = attempted.len(), "spectrum not found");
                summary.not_found.push(filename.clone());
            }
            Err(SloanyError::Transport(e)) => {
                warn!(%filename, error = %e, "could not retrieve spectrum");
                summary.failed.push(filename.clone());
            }
            Err(SloanyError::MalformedRow(e)) => {
                summary.malformed.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}
