//! SQL text preprocessing applied by the CLI before submission.
//!
//! The SkyServer CAS rejects `--` comments in URL-submitted queries and has
//! no symbolic names for the spectroscopic target flags, so queries are
//! preprocessed here: comments are stripped and flag/class names are replaced
//! with their literal values. The query executor itself never rewrites SQL;
//! this runs strictly on the caller side.

/// ANCILLARY_TARGET1 flags.
pub const WHITEDWARF_NEW: u64 = 1 << 42;
pub const WHITEDWARF_SDSS: u64 = 1 << 43;

/// BOSS_TARGET1 flags.
pub const STD_WD: u64 = 1 << 21;

/// LEGACY_TARGET1 flags.
pub const STAR_WHITE_DWARF: u64 = 1 << 19;

/// SEGUE1_TARGET1 flags.
pub const SEGUE1_CWD: u64 = 1 << 17;
pub const SEGUE1_WD: u64 = 1 << 19;

/// SEGUE2_TARGET1 flags.
pub const SEGUE2_CWD: u64 = 1 << 10;

/// Target flags substituted by name, in substitution order.
///
/// `STAR_WHITE_DWARF` must be replaced before the `STAR` class name.
const TARGET_FLAGS: &[(&str, u64)] = &[
    ("WHITEDWARF_NEW", WHITEDWARF_NEW),
    ("WHITEDWARF_SDSS", WHITEDWARF_SDSS),
    ("STD_WD", STD_WD),
    ("STAR_WHITE_DWARF", STAR_WHITE_DWARF),
    ("SEGUE1_CWD", SEGUE1_CWD),
    ("SEGUE1_WD", SEGUE1_WD),
    ("SEGUE2_CWD", SEGUE2_CWD),
];

/// Spectroscopic class names substituted with quoted literals.
const CLASSES: &[&str] = &["GALAXY", "QSO", "STAR"];

/// Removes `--` comments from a SQL statement, joining lines with spaces.
pub fn strip_comments(stmt: &str) -> String {
    let mut sql = String::with_capacity(stmt.len());
    for line in stmt.split('\n') {
        sql.push(' ');
        sql.push_str(line.split("--").next().unwrap_or(""));
    }
    sql
}

/// Replaces target-flag and class names with their literal values.
pub fn substitute_flags(stmt: &str) -> String {
    let mut sql = stmt.to_string();
    for (name, value) in TARGET_FLAGS {
        if sql.contains(name) {
            sql = sql.replace(name, &format!("CAST({value} AS BIGINT)"));
        }
    }
    for class in CLASSES {
        if sql.contains(class) {
            sql = sql.replace(class, &format!("'{class}'"));
        }
    }
    sql
}

/// Full preprocessing pipeline: comment stripping, then flag substitution.
pub fn preprocess(stmt: &str) -> String {
    substitute_flags(&strip_comments(stmt))
}
