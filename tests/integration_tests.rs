use chrono::NaiveDate;
use dataprep::error::NormalizeError;
use dataprep::ptax::month_range;
use dataprep::series::{quote_observations, resample, to_daily_series};
use dataprep::vehicles::{VehicleRecord, extract_vehicles};
use serde_json::{Value, json};

fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let text = std::fs::read_to_string(&path).expect("fixture missing");
    serde_json::from_str(&text).expect("fixture is not JSON")
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_bus_fixture_normalizes_mixed_provider_fields() {
    let raw = fixture("bus_positions.json");

    let vehicles = extract_vehicles(&raw, Some("0000-00")).expect("normalization failed");

    let expected = vec![
        VehicleRecord {
            id: "DBR1A23".into(),
            line: "8319-10".into(),
            lat: -23.5505,
            lon: -46.6333,
        },
        VehicleRecord {
            id: "51022".into(),
            line: "0000-00".into(),
            lat: -23.5612,
            lon: -46.6558,
        },
        VehicleRecord {
            id: "51023".into(),
            line: "0000-00".into(),
            lat: -23.5701,
            lon: -46.6402,
        },
        VehicleRecord {
            id: "51025".into(),
            line: "8700-10".into(),
            lat: -23.5888,
            lon: -46.6011,
        },
    ];
    assert_eq!(vehicles, expected);
}

#[test]
fn test_bus_output_shape() {
    let raw = json!([{"lat": 1.0, "lon": 2.0}]);

    let vehicles = extract_vehicles(&raw, None).unwrap();

    assert_eq!(
        serde_json::to_value(&vehicles).unwrap(),
        json!([{"id": "", "line": "", "lat": 1.0, "lon": 2.0}])
    );
}

#[test]
fn test_alias_coordinate_with_text_aborts_batch() {
    let err = extract_vehicles(&json!([{"x": "oops"}]), None).unwrap_err();

    assert!(matches!(err, NormalizeError::Coordinate { key: "x", .. }));
}

#[test]
fn test_ptax_fixture_fills_every_day_of_month() {
    let raw = fixture("ptax_082021.json");
    let values = raw["value"].as_array().unwrap();
    let (first, last) = month_range("082021").unwrap();

    let series = to_daily_series(values, first, last).unwrap();

    assert_eq!(series.len(), 31);
    assert_eq!(series.first().unwrap().date, day("2021-08-01"));
    assert_eq!(series.last().unwrap().date, day("2021-08-31"));
    assert_eq!(series[0].value, None);
    assert_eq!(series[1].value, Some(5.1644));
    // Weekend of 7-8 August carries Friday's quote.
    assert_eq!(series[6].value, Some(5.2284));
    assert_eq!(series[7].value, Some(5.2284));
    assert_eq!(series[8].value, Some(5.2412));
    // Nothing after the 10th: the tail carries the last quote.
    assert!(series[9..].iter().all(|p| p.value == Some(5.2404)));
}

#[test]
fn test_resample_length_matches_range_for_several_ranges() {
    let observations = quote_observations(&[
        json!({"dataHora": "2020-02-28", "cotacaoVenda": 4.4}),
        json!({"dataHora": "2020-03-02", "cotacaoVenda": 4.5}),
    ])
    .unwrap();

    for (first, last) in [
        ("2020-02-28", "2020-02-28"),
        ("2020-02-01", "2020-03-31"),
        ("2019-12-30", "2020-01-02"),
    ] {
        let (first, last) = (day(first), day(last));
        let series = resample(&observations, first, last);

        assert_eq!(series.len() as i64, (last - first).num_days() + 1);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }
}
