//! Spectrum fetch integration tests.
//!
//! Drives the full fetch loop over the README's 10-row white dwarf example
//! with scripted transports.

use pretty_assertions::assert_eq;

use sloany::skyserver::QueryResult;
use sloany::spectra::{
    fetch_all, FetchDecision, FetchOutcome, FileResponse, MemorySink, MockTransport,
    SpectrumFetcher,
};

/// The ten white dwarf candidates from the README example query.
const WHITE_DWARFS: [(&str, &str, &str); 10] = [
    ("55742", "4724", "734"),
    ("55361", "4077", "709"),
    ("55361", "4077", "755"),
    ("55589", "4446", "190"),
    ("55737", "4711", "262"),
    ("55501", "4096", "836"),
    ("55691", "4860", "700"),
    ("55691", "4860", "830"),
    ("55680", "4175", "460"),
    ("55277", "3873", "672"),
];

fn readme_result() -> QueryResult {
    QueryResult::with_data(
        vec![
            "mjd".into(),
            "plate".into(),
            "fiberid".into(),
            "survey".into(),
        ],
        WHITE_DWARFS
            .iter()
            .map(|(mjd, plate, fiberid)| {
                vec![
                    mjd.to_string(),
                    plate.to_string(),
                    fiberid.to_string(),
                    "boss".to_string(),
                ]
            })
            .collect(),
    )
}

#[tokio::test]
async fn test_full_run_fetches_ten_of_ten() {
    let result = readme_result();
    let fetcher = SpectrumFetcher::new(MockTransport::answering_all(FileResponse::ok("fits")));
    let mut sink = MemorySink::new();

    let summary = fetch_all(&fetcher, &result, &mut sink, |plan| {
        assert_eq!(plan.filenames.len(), 10);
        assert!(plan.existing.is_empty());
        FetchDecision::All
    })
    .await
    .unwrap();

    assert_eq!(summary.report_line(), "10 of 10 spectra fetched");
    assert_eq!(sink.files().len(), 10);
    // One success per row, no fallback probes needed.
    assert_eq!(fetcher.transport().request_count(), 10);
}

#[tokio::test]
async fn test_fetch_attempts_are_sequential_in_row_order() {
    let result = readme_result();
    let fetcher = SpectrumFetcher::new(MockTransport::answering_all(FileResponse::ok("fits")));
    let mut sink = MemorySink::new();

    fetch_all(&fetcher, &result, &mut sink, |_| FetchDecision::All)
        .await
        .unwrap();

    let requests = fetcher.transport().requests();
    let expected: Vec<String> = WHITE_DWARFS
        .iter()
        .map(|(mjd, plate, fiberid)| {
            format!(
                "http://data.sdss3.org/sas/dr9/sdss/spectro/redux/lite/{:04}/spec-{:04}-{}-{:04}.fits",
                plate.parse::<u32>().unwrap(),
                plate.parse::<u32>().unwrap(),
                mjd,
                fiberid.parse::<u32>().unwrap(),
            )
        })
        .collect();
    assert_eq!(requests, expected);
}

#[tokio::test]
async fn test_boss_fallback_used_when_lite_path_missing() {
    let result = QueryResult::with_data(
        vec![
            "survey".into(),
            "plate".into(),
            "mjd".into(),
            "fiberid".into(),
        ],
        vec![vec![
            "boss".into(),
            "4075".into(),
            "55352".into(),
            "802".into(),
        ]],
    );
    let boss_url =
        "http://data.sdss3.org/sas/dr9/boss/spectro/redux/v5_4_45/spectra/lite/4075/spec-4075-55352-0802.fits";
    let fetcher = SpectrumFetcher::new(
        MockTransport::new().respond(boss_url, FileResponse::ok("boss bytes")),
    );

    match fetcher.fetch(&result.rows[0]).await.unwrap() {
        FetchOutcome::Success { url, bytes } => {
            assert_eq!(url, boss_url);
            assert_eq!(bytes, b"boss bytes");
        }
        other => panic!("expected Success, got {other:?}"),
    }
    assert_eq!(fetcher.transport().request_count(), 2);
}

#[tokio::test]
async fn test_second_run_only_fetches_missing() {
    let result = readme_result();
    let fetcher = SpectrumFetcher::new(MockTransport::answering_all(FileResponse::ok("fits")));
    let mut sink = MemorySink::new()
        .preload("spec-4724-55742-0734.fits", "fits")
        .preload("spec-4077-55361-0709.fits", "fits");

    let summary = fetch_all(&fetcher, &result, &mut sink, |plan| {
        assert_eq!(plan.existing.len(), 2);
        FetchDecision::MissingOnly
    })
    .await
    .unwrap();

    assert_eq!(summary.fetched, 8);
    assert_eq!(summary.skipped_existing, 2);
    assert_eq!(fetcher.transport().request_count(), 8);
    assert_eq!(summary.report_line(), "8 of 10 spectra fetched");
}
