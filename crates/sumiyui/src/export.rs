//! Delimited-text export of chart tables.
//!
//! Longitudes are rounded to two decimals; output is UTF-8 with a header row.

use crate::degrees::round2;
use crate::pipeline::{MidpointRow, NatalRow};
use serde::Serialize;
use std::io::Write;

pub const DEFAULT_EXPORT_FILE: &str = "sumiyui_all_data.csv";

pub const NATAL_HEADER: [&str; 5] = ["Point", "Longitude", "Sabian", "HN8_Longitude", "HN8_Sabian"];
pub const MIDPOINT_HEADER: [&str; 6] = [
    "Combination",
    "Midpoint",
    "Sabian",
    "HN8_Midpoint",
    "HN8_Sabian",
    "Meaning",
];
pub const AXIS_HEADER: [&str; 4] = ["Combination", "Meaning", "Sabian", "HN8_Sabian"];

/// Header is written up front so empty tables still carry it.
fn writer_with_header<W: Write>(writer: W, header: &[&str]) -> csv::Result<csv::Writer<W>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    Ok(wtr)
}

#[derive(Debug, Serialize)]
struct NatalRecord<'a> {
    point: &'a str,
    longitude: f64,
    sabian: &'a str,
    harmonic_longitude: f64,
    harmonic_sabian: &'a str,
}

#[derive(Debug, Serialize)]
struct MidpointRecord<'a> {
    combination: String,
    midpoint: f64,
    sabian: &'a str,
    harmonic_midpoint: f64,
    harmonic_sabian: &'a str,
    meaning: &'a str,
}

#[derive(Debug, Serialize)]
struct AxisRecord<'a> {
    combination: String,
    meaning: &'a str,
    sabian: &'a str,
    harmonic_sabian: &'a str,
}

/// Natal table: `Point,Longitude,Sabian,HN8_Longitude,HN8_Sabian`.
pub fn write_natal_csv<W: Write>(rows: &[NatalRow], writer: W) -> csv::Result<()> {
    let mut wtr = writer_with_header(writer, &NATAL_HEADER)?;
    for row in rows {
        wtr.serialize(NatalRecord {
            point: row.point.label(),
            longitude: round2(row.natal.longitude),
            sabian: &row.natal.symbol,
            harmonic_longitude: round2(row.harmonic8.longitude),
            harmonic_sabian: &row.harmonic8.symbol,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Full halfsum table:
/// `Combination,Midpoint,Sabian,HN8_Midpoint,HN8_Sabian,Meaning`.
///
/// Unclassified rows leave `Meaning` empty.
pub fn write_midpoints_csv<W: Write>(rows: &[MidpointRow], writer: W) -> csv::Result<()> {
    let mut wtr = writer_with_header(writer, &MIDPOINT_HEADER)?;
    for row in rows {
        wtr.serialize(MidpointRecord {
            combination: row.pair.label(),
            midpoint: round2(row.midpoint.longitude),
            sabian: &row.midpoint.symbol,
            harmonic_midpoint: round2(row.harmonic8.longitude),
            harmonic_sabian: &row.harmonic8.symbol,
            meaning: row.axis_meaning.as_deref().unwrap_or(""),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Important-axis table: `Combination,Meaning,Sabian,HN8_Sabian`.
///
/// Rows without an axis meaning are skipped.
pub fn write_axes_csv<W: Write>(rows: &[MidpointRow], writer: W) -> csv::Result<()> {
    let mut wtr = writer_with_header(writer, &AXIS_HEADER)?;
    for row in rows {
        let Some(meaning) = row.axis_meaning.as_deref() else {
            continue;
        };
        wtr.serialize(AxisRecord {
            combination: row.pair.label(),
            meaning,
            sabian: &row.midpoint.symbol,
            harmonic_sabian: &row.harmonic8.symbol,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Full halfsum table as UTF-8 bytes, ready for a download or a file.
pub fn midpoints_csv_bytes(rows: &[MidpointRow]) -> csv::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_midpoints_csv(rows, &mut buf)?;
    Ok(buf)
}
