mod common;

use common::sample_ephemeris;
use sumiyui::axes::FAMILY_AXIS;
use sumiyui::export::{midpoints_csv_bytes, write_axes_csv, write_natal_csv};
use sumiyui::{AxisTable, BirthData, ChartPipeline, ChartReport, SymbolTable};

fn sample_report() -> ChartReport {
    let eph = sample_ephemeris();
    let symbols = SymbolTable::placeholder();
    let axes = AxisTable::standard();
    let birth = BirthData::parse("1980-01-01", "12:00", 35.6895, 139.6917, "9").unwrap();
    ChartPipeline::new(&eph, &symbols, &axes).run(&birth).unwrap()
}

#[test]
fn test_midpoint_export_has_header_and_one_row_per_pair() {
    let report = sample_report();
    let bytes = midpoints_csv_bytes(&report.midpoints).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 67);
    assert_eq!(lines[0], "Combination,Midpoint,Sabian,HN8_Midpoint,HN8_Sabian,Meaning");
    assert_eq!(
        lines[1],
        format!("Sun / Moon,190.0,Degree 191 Symbol,80.0,Degree 81 Symbol,{}", FAMILY_AXIS)
    );
    // Sun / Mercury carries no meaning
    assert!(lines[2].starts_with("Sun / Mercury,272.75,Degree 273 Symbol,"));
    assert!(lines[2].ends_with(','));
}

#[test]
fn test_midpoint_export_rounds_to_two_decimals() {
    let mut report = sample_report();
    report.midpoints[0].midpoint.longitude = 190.123_456;
    let text = String::from_utf8(midpoints_csv_bytes(&report.midpoints).unwrap()).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("Sun / Moon,190.12,"));
}

#[test]
fn test_natal_export() {
    let report = sample_report();
    let mut buf = Vec::new();
    write_natal_csv(&report.natal, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "Point,Longitude,Sabian,HN8_Longitude,HN8_Sabian");
    assert_eq!(lines[1], "Sun,280.0,Degree 281 Symbol,80.0,Degree 81 Symbol");
    assert!(lines[11].starts_with("ASC,15.0,Degree 16 Symbol,"));
    assert!(lines[12].starts_with("MC,275.0,Degree 276 Symbol,"));
}

#[test]
fn test_axes_export_only_classified_rows() {
    let report = sample_report();
    let mut buf = Vec::new();
    write_axes_csv(&report.midpoints, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "Combination,Meaning,Sabian,HN8_Sabian");
    assert_eq!(
        lines[1],
        format!("Sun / Moon,{},Degree 191 Symbol,Degree 81 Symbol", FAMILY_AXIS)
    );
}

#[test]
fn test_axes_export_keeps_header_when_empty() {
    let mut buf = Vec::new();
    write_axes_csv(&[], &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "Combination,Meaning,Sabian,HN8_Sabian\n");
}
