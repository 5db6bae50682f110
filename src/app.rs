//! Application orchestration for sloany.
//!
//! Ties the CLI surface to the core: loads configuration, collects queries,
//! executes them, renders the results, and drives the fetch loop with a
//! terminal prompt and an on-disk artifact sink.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::warn;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Result, SloanyError};
use crate::names;
use crate::output;
use crate::skyserver::{sql, QueryResult, QueryService, SkyServerClient};
use crate::spectra::{
    fetch_all, spec_filename, DirectorySink, FetchDecision, FetchPlan, FetchSummary,
    HttpTransport, SpectrumFetcher,
};

/// File collecting the names of spectra that could not be retrieved.
const FAILED_FETCHES_FILE: &str = "Failed_Fetches";

/// File listing spectrum filenames with their object designations.
const METADATA_FILE: &str = "METADATA";

/// Runs the tool with the given arguments.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_from_file(&cli.config_path())?;
    config.apply_env_overrides();
    if let Some(secs) = cli.timeout {
        config.set_timeout_secs(secs);
    }
    config.validate()?;

    let queries = collect_queries(&cli)?;
    if queries.is_empty() {
        return Err(SloanyError::config(
            "no query given; pass -q or name files containing SQL",
        ));
    }

    let client = SkyServerClient::new(config.skyserver.url.clone(), config.skyserver_timeout())?;
    let mut stdout = io::stdout();

    for query in &queries {
        let statement = sql::preprocess(query);
        let result = client.execute_query(&statement).await?;
        output::render_table(&mut stdout, &result)?;

        if cli.metadata {
            write_metadata(&mut stdout, &result, Path::new("."))?;
        }

        if let Some(dir) = &cli.fetch {
            let transport = HttpTransport::new(config.spectra_timeout())?;
            let fetcher =
                SpectrumFetcher::new(transport).with_base_url(config.spectra.base_url.clone());
            let mut sink = DirectorySink::new(dir)?;

            let assume_yes = cli.yes;
            let summary = fetch_all(&fetcher, &result, &mut sink, |plan| {
                if assume_yes {
                    FetchDecision::MissingOnly
                } else {
                    prompt_decision(plan)
                }
            })
            .await?;

            report(&mut stdout, &summary)?;
            record_failed_fetches(&summary, Path::new("."))?;
        }
    }

    Ok(())
}

/// Collects the SQL statements to execute: the inline query first, then the
/// contents of each query file in argument order.
pub fn collect_queries(cli: &Cli) -> Result<Vec<String>> {
    let mut queries = Vec::new();
    if let Some(query) = &cli.query {
        queries.push(query.clone());
    }
    for path in &cli.filenames {
        let text = fs::read_to_string(path).map_err(|e| {
            SloanyError::Io(io::Error::new(
                e.kind(),
                format!("could not open {} for reading: {e}", path.display()),
            ))
        })?;
        queries.push(text);
    }
    Ok(queries)
}

/// Interactive confirmation before fetching.
fn prompt_decision(plan: &FetchPlan) -> FetchDecision {
    if plan.existing.is_empty() {
        println!("\nDo you want to fetch the following spectra?");
        describe_plan(plan);
        print!("Y/N [Y]:  ");
    } else {
        println!(
            "\nSome spectra seem to be already present in the destination directory.\n\
             Do you want to fetch all spectra [A], only the missing spectra [Y], or nothing [N]."
        );
        describe_plan(plan);
        print!("A/Y/N [Y]:  ");
    }
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return FetchDecision::Nothing;
    }
    parse_answer(&answer, !plan.existing.is_empty())
}

/// Lists the planned files when the list is short, counts otherwise.
fn describe_plan(plan: &FetchPlan) {
    if plan.filenames.len() <= 10 {
        for filename in &plan.filenames {
            if plan.existing.contains(filename) {
                println!("{filename}\tExisting");
            } else {
                println!("{filename}");
            }
        }
    } else {
        println!("{} spectra files", plan.filenames.len());
        if !plan.existing.is_empty() {
            println!("{} existing files", plan.existing.len());
        }
    }
}

/// Maps a prompt answer to a decision. The default (empty) answer fetches
/// the missing spectra.
pub fn parse_answer(answer: &str, have_existing: bool) -> FetchDecision {
    let answer = answer.trim().to_uppercase();
    match answer.as_str() {
        "" | "Y" | "YES" => {
            if have_existing {
                FetchDecision::MissingOnly
            } else {
                FetchDecision::All
            }
        }
        "A" | "ALL" => FetchDecision::All,
        _ => FetchDecision::Nothing,
    }
}

/// Prints the closing fetch report.
fn report(out: &mut impl Write, summary: &FetchSummary) -> io::Result<()> {
    if summary.declined {
        return Ok(());
    }
    for filename in &summary.not_found {
        writeln!(out, "WARNING: {filename} was not found on the server")?;
    }
    for filename in &summary.failed {
        writeln!(out, "WARNING: could not retrieve {filename}")?;
    }
    for message in &summary.malformed {
        writeln!(out, "WARNING: skipped a row: {message}")?;
    }
    writeln!(out, "{}", summary.report_line())?;
    Ok(())
}

/// Appends the filenames of unretrieved spectra to `Failed_Fetches`.
pub fn record_failed_fetches(summary: &FetchSummary, dir: &Path) -> Result<()> {
    let mut missing: Vec<&String> = summary.not_found.iter().chain(&summary.failed).collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(FAILED_FETCHES_FILE))?;
    for filename in missing {
        writeln!(file, "{filename}")?;
    }
    Ok(())
}

/// Writes the METADATA file pairing each spectrum filename with the object's
/// long and short designations. Requires `ra` and `dec` in the result.
pub fn write_metadata(out: &mut impl Write, result: &QueryResult, dir: &Path) -> Result<()> {
    if !has_column(result, "ra") || !has_column(result, "dec") {
        warn!("query result has no ra/dec columns; skipping METADATA");
        return Ok(());
    }

    let mut lines = Vec::new();
    for row in &result.rows {
        let parsed = (
            parse_coord(row.get("ra")),
            parse_coord(row.get("dec")),
            parse_field(row.get("plate")),
            parse_field(row.get("mjd")),
            parse_field(row.get("fiberid")),
        );
        let (Some(ra), Some(dec), Some(plate), Some(mjd), Some(fiberid)) = parsed else {
            warn!("row lacks coordinates or identifiers; left out of METADATA");
            continue;
        };
        let (long, short) = names::designation(ra, dec);
        lines.push(format!(
            "{}    {}    {}",
            spec_filename(plate, mjd, fiberid),
            long,
            short
        ));
    }

    let mut file = fs::File::create(dir.join(METADATA_FILE))?;
    for line in &lines {
        writeln!(file, "{line}")?;
    }
    writeln!(out, "Wrote METADATA file with {} objects.", lines.len())?;
    Ok(())
}

fn has_column(result: &QueryResult, name: &str) -> bool {
    result.columns.iter().any(|c| c == name)
}

fn parse_coord(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.parse().ok())
}

fn parse_field(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.parse().ok())
}
