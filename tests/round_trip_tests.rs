// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip tests for the bundled formats.
//!
//! Routes written with a format and read back with that format as the only
//! candidate keep their coordinates.

mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::SharedBuffer;
use navcodec::io::formats::{CsvFormat, GeoJsonFormat};
use navcodec::{
    FormatRef, NavParser, OutputTarget, Position, Route, RouteCharacteristics, WriteOptions,
};

const TOLERANCE: f64 = 1e-6;

fn sample_route(format: &FormatRef) -> Route {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap();
    Route::new(
        format.clone(),
        RouteCharacteristics::Track,
        vec![
            Position::new(13.377_704, 52.516_275)
                .with_elevation(34.0)
                .with_time(start),
            Position::new(13.378_001, 52.516_512).with_elevation(34.5),
            Position::new(13.379_117, 52.517_004),
            Position::new(-0.127_758, 51.507_351)
                .with_elevation(-2.25)
                .with_description("London"),
        ],
    )
}

fn assert_same_positions(expected: &Route, actual: &Route) {
    assert_eq!(expected.position_count(), actual.position_count());
    for (e, a) in expected.positions().iter().zip(actual.positions()) {
        assert!((e.longitude - a.longitude).abs() < TOLERANCE);
        assert!((e.latitude - a.latitude).abs() < TOLERANCE);
        match (e.elevation, a.elevation) {
            (Some(x), Some(y)) => assert!((x - y).abs() < TOLERANCE),
            (x, y) => assert_eq!(x, y),
        }
    }
}

fn round_trip(format: FormatRef) {
    let parser = NavParser::with_defaults();
    let route = sample_route(&format);

    let buffer = SharedBuffer::default();
    let mut targets = vec![OutputTarget::stream(buffer.clone())];
    parser
        .write_route_to(&route, &format, WriteOptions::new(), None, &mut targets)
        .unwrap();

    let result = parser
        .read_reader(buffer.text().as_bytes(), Some(std::slice::from_ref(&format)))
        .unwrap();
    assert_eq!(result.format().unwrap().name(), format.name());
    assert_eq!(result.routes().len(), 1);
    assert_same_positions(&route, result.the_route().unwrap());
}

#[test]
fn test_csv_round_trip() {
    round_trip(Arc::new(CsvFormat::new()));
}

#[test]
fn test_geojson_round_trip() {
    round_trip(Arc::new(GeoJsonFormat::new()));
}

#[test]
fn test_csv_keeps_time_and_description() {
    let parser = NavParser::with_defaults();
    let csv: FormatRef = Arc::new(CsvFormat::new());
    let route = sample_route(&csv);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ride.csv");
    parser.write_route(&route, &csv, &path).unwrap();

    let result = parser.read_path(&path).unwrap();
    let read = result.the_route().unwrap();
    assert_eq!(read.positions()[0].time, route.positions()[0].time);
    assert_eq!(read.positions()[3].description.as_deref(), Some("London"));
    // Positions without description are commented on write
    assert_eq!(read.positions()[1].description.as_deref(), Some("Position 2"));
}

#[test]
fn test_csv_to_geojson_conversion() {
    let parser = NavParser::with_defaults();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ride.csv");
    std::fs::write(&input, "8.5,53.1,10\n8.6,53.2,11\n8.7,53.3,12\n").unwrap();

    let read = parser.read_path(&input).unwrap();
    let route = read.the_route().unwrap();
    let geojson = parser.format_by_name("GeoJSON").unwrap();

    let output = dir.path().join("ride.geojson");
    let report = parser.write_route(route, &geojson, &output).unwrap();
    assert_eq!(report.format, "GeoJSON");
    assert_eq!(report.chunks, vec![0..3]);

    let converted = parser.read_path(&output).unwrap();
    assert_eq!(converted.format().unwrap().name(), "GeoJSON");
    assert_same_positions(route, converted.the_route().unwrap());
    assert_eq!(converted.the_route().unwrap().name(), route.name());
}

#[test]
fn test_csv_split_across_files() {
    let parser = NavParser::with_defaults();
    let csv: FormatRef = Arc::new(CsvFormat::with_max_positions(3));
    let route = Route::new(
        csv.clone(),
        RouteCharacteristics::Track,
        (0..7).map(|i| Position::new(i as f64, i as f64 / 2.0)).collect(),
    );
    assert_eq!(parser.files_to_write_for(&route, &csv, false), 3);

    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<_> = (1..=3).map(|i| dir.path().join(format!("part{i}.csv"))).collect();
    let mut targets: Vec<OutputTarget> = paths.iter().map(OutputTarget::file).collect();
    parser
        .write_route_to(&route, &csv, WriteOptions::new(), None, &mut targets)
        .unwrap();

    let mut longitudes = Vec::new();
    for path in &paths {
        let result = parser.read_path(path).unwrap();
        longitudes.extend(
            result
                .the_route()
                .unwrap()
                .positions()
                .iter()
                .map(|p| p.longitude),
        );
    }
    assert_eq!(longitudes, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_geojson_holds_several_routes() {
    let parser = NavParser::with_defaults();
    let geojson: FormatRef = Arc::new(GeoJsonFormat::new());
    let routes = vec![
        sample_route(&geojson).with_name("Out"),
        sample_route(&geojson).with_name("Back"),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tour.geojson");
    parser
        .write_routes(&routes, &geojson, &mut OutputTarget::file(&path))
        .unwrap();

    let result = parser.read_path(&path).unwrap();
    let names: Vec<_> = result.routes().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec![Some("Out"), Some("Back")]);
    for (expected, actual) in routes.iter().zip(result.routes()) {
        assert_same_positions(expected, actual);
    }
}
