//! Query execution integration tests.
//!
//! Verifies that results pass through the query layer exactly as the remote
//! service produced them: same columns, same order, cells kept as text.

use pretty_assertions::assert_eq;

use sloany::skyserver::{parse_csv_response, MockQueryService, QueryResult, QueryService};

fn white_dwarf_result() -> QueryResult {
    QueryResult::with_data(
        vec![
            "mjd".into(),
            "plate".into(),
            "fiberid".into(),
            "survey".into(),
            "ra".into(),
            "dec".into(),
        ],
        vec![
            row(&["55742", "4724", "734", "boss", "241.30465", "26.982166"]),
            row(&["55361", "4077", "709", "boss", "319.35173", "4.7338973"]),
            row(&["55277", "3873", "672", "boss", "217.85955", "31.020043"]),
        ],
    )
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn test_columns_and_rows_pass_through_unreordered() {
    let service = MockQueryService::with_table(
        white_dwarf_result().columns.to_vec(),
        white_dwarf_result()
            .rows
            .iter()
            .map(|r| r.values().to_vec())
            .collect(),
    );

    let result = service
        .execute_query("select top 3 s.mjd,s.plate,s.fiberid,s.survey,s.ra,s.dec from SpecObj as s")
        .await
        .unwrap();

    assert_eq!(
        result.columns.as_slice(),
        &["mjd", "plate", "fiberid", "survey", "ra", "dec"]
    );
    assert_eq!(result.row_count, 3);
    // Row order is exactly the service's: descending mjd here, no sorting.
    assert_eq!(result.rows[0].get("mjd"), Some("55742"));
    assert_eq!(result.rows[1].get("mjd"), Some("55361"));
    assert_eq!(result.rows[2].get("mjd"), Some("55277"));
}

#[tokio::test]
async fn test_cells_stay_text() {
    let service = MockQueryService::with_table(
        vec!["ra".into()],
        vec![vec!["241.30465".into()]],
    );
    let result = service.execute_query("select s.ra from SpecObj as s").await.unwrap();
    // No numeric coercion: the cell is the exact text the service sent.
    assert_eq!(result.rows[0].get("ra"), Some("241.30465"));
}

#[test]
fn test_csv_body_round_trips_into_result() {
    let body = "mjd,plate,fiberid,survey\n\
                55742,4724,734,boss\n\
                55361,4077,709,boss\n";
    let (columns, cells) = parse_csv_response(body).unwrap();
    let result = QueryResult::with_data(columns, cells);

    assert_eq!(result.row_count, 2);
    assert_eq!(result.rows[0].get("survey"), Some("boss"));
    assert_eq!(result.rows[1].get("plate"), Some("4077"));
}
