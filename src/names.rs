//! IAU-style object designations.
//!
//! Builds the long (`Jhhmmss.ss±ddmmss.s`) and short (`Jhhmm±ddmm`)
//! designations for an object from its right ascension and declination in
//! degrees. Trailing digits are truncated, not rounded, per the SDSS naming
//! convention.

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// Returns the (long, short) designations for the given coordinates.
pub fn designation(ra: f64, dec: f64) -> (String, String) {
    let sec = ra * SECONDS_PER_DAY / 360.0;
    let hours = (sec / SECONDS_PER_HOUR) as u32;
    let minutes = ((sec % SECONDS_PER_HOUR) / 60.0) as u32;
    let ra_secs = truncated(sec % 60.0, 5);

    let (sign, dec) = if dec >= 0.0 { ('+', dec) } else { ('-', -dec) };
    let degrees = dec as u32;
    let frac = dec % 1.0;
    let dec_mins = (frac * 60.0) as u32;
    let dec_secs = truncated(3600.0 * frac - 60.0 * f64::from(dec_mins), 4);

    let long = format!("J{hours:02}{minutes:02}{ra_secs}{sign}{degrees:02}{dec_mins:02}{dec_secs}");
    let short = format!("J{hours:02}{minutes:02}{sign}{degrees:02}{dec_mins:02}");
    (long, short)
}

/// Formats `value` as zero-padded `00.00000` and truncates to `len` chars.
fn truncated(value: f64, len: usize) -> String {
    let mut s = format!("{value:08.5}");
    s.truncate(len);
    s
}
