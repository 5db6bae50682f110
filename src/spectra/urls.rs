//! Candidate URL derivation for spectrum files.
//!
//! A spectrum is uniquely named by plate, MJD and fiber id. The file may live
//! under the SDSS "lite" reduction path or under the BOSS reduction path on
//! the same SAS host; candidates are derived in that order.

use crate::error::{Result, SloanyError};
use crate::skyserver::Row;

/// DR9 Science Archive Server base URL.
pub const DEFAULT_SAS_BASE_URL: &str = "http://data.sdss3.org/sas/dr9";

/// BOSS reduction version used by the fallback path.
const BOSS_RUN2D: &str = "v5_4_45";

/// Identifiers naming one spectrum, extracted from a result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrumId {
    pub survey: String,
    pub plate: u32,
    pub mjd: u32,
    pub fiberid: u32,
}

impl SpectrumId {
    /// Extracts the identifiers from a row.
    ///
    /// The row must carry `survey`, `plate`, `mjd` and `fiberid`; a missing
    /// or non-numeric field is a malformed-row error. No network I/O happens
    /// here.
    pub fn from_row(row: &Row) -> Result<Self> {
        let survey = required(row, "survey")?.to_string();
        let plate = numeric(row, "plate")?;
        let mjd = numeric(row, "mjd")?;
        let fiberid = numeric(row, "fiberid")?;
        Ok(Self {
            survey,
            plate,
            mjd,
            fiberid,
        })
    }

    /// Spectrum file name for this id.
    pub fn filename(&self) -> String {
        spec_filename(self.plate, self.mjd, self.fiberid)
    }
}

/// Spectrum file name: `spec-PPPP-MMMMM-FFFF.fits`.
///
/// Plate and fiber id are zero-padded to 4 digits; mjd is not padded.
pub fn spec_filename(plate: u32, mjd: u32, fiberid: u32) -> String {
    format!("spec-{plate:04}-{mjd}-{fiberid:04}.fits")
}

fn required<'a>(row: &'a Row, name: &str) -> Result<&'a str> {
    row.get(name)
        .ok_or_else(|| SloanyError::malformed_row(format!("row is missing column '{name}'")))
}

fn numeric(row: &Row, name: &str) -> Result<u32> {
    let raw = required(row, name)?;
    raw.parse().map_err(|_| {
        SloanyError::malformed_row(format!("column '{name}' value '{raw}' is not an integer"))
    })
}

/// A function deriving one candidate URL from the SAS base and a spectrum id.
pub type UrlTemplate = fn(&str, &SpectrumId) -> String;

/// SDSS "lite" reduction path, tried first.
pub fn sdss_lite_url(base: &str, id: &SpectrumId) -> String {
    format!(
        "{}/sdss/spectro/redux/lite/{:04}/{}",
        base.trim_end_matches('/'),
        id.plate,
        id.filename()
    )
}

/// BOSS reduction path, tried second.
pub fn boss_lite_url(base: &str, id: &SpectrumId) -> String {
    format!(
        "{}/boss/spectro/redux/{}/spectra/lite/{:04}/{}",
        base.trim_end_matches('/'),
        BOSS_RUN2D,
        id.plate,
        id.filename()
    )
}

/// The candidate templates in priority order.
///
/// Both are always tried regardless of the row's `survey` value; additional
/// mirrors slot in here without touching fetch logic.
pub fn default_templates() -> Vec<UrlTemplate> {
    vec![sdss_lite_url, boss_lite_url]
}
