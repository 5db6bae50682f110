//! Command-line argument parsing for sloany.

use clap::Parser;
use std::path::PathBuf;

/// Search SDSS and fetch spectra files.
#[derive(Parser, Debug)]
#[command(name = "sloany")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Files containing SQL commands to be executed on the SkyServer
    #[arg(value_name = "FILES")]
    pub filenames: Vec<PathBuf>,

    /// SQL query to execute on the SkyServer
    #[arg(short, long, value_name = "SQL")]
    pub query: Option<String>,

    /// Fetch the spectrum file for each object. If optional FOLDER is
    /// provided, put the spectrum files in that folder
    #[arg(short, long, value_name = "FOLDER", num_args = 0..=1, default_missing_value = ".")]
    pub fetch: Option<PathBuf>,

    /// Write a METADATA file with object designations (requires ra and dec
    /// in the query result)
    #[arg(short, long)]
    pub metadata: bool,

    /// Fetch missing spectra without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// HTTP timeout in seconds for queries and downloads
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_parse_inline_query() {
        let cli = parse_args(&["sloany", "-q", "select top 10 s.plate from SpecObj as s"]);
        assert_eq!(
            cli.query,
            Some("select top 10 s.plate from SpecObj as s".to_string())
        );
        assert!(cli.filenames.is_empty());
        assert!(cli.fetch.is_none());
    }

    #[test]
    fn test_parse_query_files() {
        let cli = parse_args(&["sloany", "wd.sql", "qso.sql"]);
        assert_eq!(
            cli.filenames,
            vec![PathBuf::from("wd.sql"), PathBuf::from("qso.sql")]
        );
    }

    #[test]
    fn test_parse_fetch_without_folder() {
        let cli = parse_args(&["sloany", "-q", "select 1", "--fetch"]);
        assert_eq!(cli.fetch, Some(PathBuf::from(".")));
    }

    #[test]
    fn test_parse_fetch_with_folder() {
        let cli = parse_args(&["sloany", "-q", "select 1", "--fetch", "spectra"]);
        assert_eq!(cli.fetch, Some(PathBuf::from("spectra")));
    }

    #[test]
    fn test_parse_metadata_and_yes() {
        let cli = parse_args(&["sloany", "-q", "select 1", "-m", "-y"]);
        assert!(cli.metadata);
        assert!(cli.yes);
    }

    #[test]
    fn test_parse_timeout() {
        let cli = parse_args(&["sloany", "-q", "select 1", "--timeout", "120"]);
        assert_eq!(cli.timeout, Some(120));
    }

    #[test]
    fn test_parse_config_path() {
        let cli = parse_args(&["sloany", "--config", "/path/to/config.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
        assert_eq!(cli.config_path(), PathBuf::from("/path/to/config.toml"));
    }

    #[test]
    fn test_default_config_path() {
        let cli = parse_args(&["sloany"]);
        assert!(cli.config_path().ends_with("sloany/config.toml"));
    }
}
