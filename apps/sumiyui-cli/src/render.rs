//! Plain-text tables for terminal output.
//!
//! Symbol labels go in the last column; they may contain wide characters.

use std::fmt::{self, Write};
use sumiyui::degrees::round2;
use sumiyui::{MidpointRow, NatalRow};

const PAIR_WIDTH: usize = 19;

pub fn natal_table(rows: &[NatalRow]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Natal positions")?;
    writeln!(
        out,
        "{:<8} {:>9} {:>5} {:>9} {:>5}  {}",
        "Point", "Longitude", "Deg", "HN8", "Deg", "Sabian / HN8 Sabian"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<8} {:>9.2} {:>5} {:>9.2} {:>5}  {} / {}",
            row.point.label(),
            round2(row.natal.longitude),
            row.natal.sabian,
            round2(row.harmonic8.longitude),
            row.harmonic8.sabian,
            row.natal.symbol,
            row.harmonic8.symbol,
        )?;
    }
    Ok(out)
}

pub fn axis_table(rows: &[MidpointRow]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Named axes")?;
    if rows.is_empty() {
        writeln!(out, "(none)")?;
        return Ok(out);
    }
    for row in rows {
        let meaning = row.axis_meaning.as_deref().unwrap_or_default();
        writeln!(
            out,
            "{:<width$} {:>9.2} {:>5}  {}",
            row.pair.label(),
            round2(row.midpoint.longitude),
            row.midpoint.sabian,
            meaning,
            width = PAIR_WIDTH
        )?;
        writeln!(out, "{:<width$}   {}", "", row.midpoint.symbol, width = PAIR_WIDTH + 16)?;
        writeln!(
            out,
            "{:<width$}   HN8 {:.2} ({}) {}",
            "",
            round2(row.harmonic8.longitude),
            row.harmonic8.sabian,
            row.harmonic8.symbol,
            width = PAIR_WIDTH + 16
        )?;
    }
    Ok(out)
}

pub fn midpoint_table(rows: &[MidpointRow]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "All halfsums")?;
    writeln!(
        out,
        "{:<width$} {:>9} {:>5} {:>9} {:>5}  {}",
        "Combination",
        "Midpoint",
        "Deg",
        "HN8",
        "Deg",
        "Sabian",
        width = PAIR_WIDTH
    )?;
    for row in rows {
        let marker = if row.is_important() { " *" } else { "" };
        writeln!(
            out,
            "{:<width$} {:>9.2} {:>5} {:>9.2} {:>5}  {}{}",
            row.pair.label(),
            round2(row.midpoint.longitude),
            row.midpoint.sabian,
            round2(row.harmonic8.longitude),
            row.harmonic8.sabian,
            row.midpoint.symbol,
            marker,
            width = PAIR_WIDTH
        )?;
    }
    Ok(out)
}
