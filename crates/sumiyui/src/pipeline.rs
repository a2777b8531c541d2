//! One natal chart request: positions, natal rows and every halfsum row.

use crate::axes::AxisTable;
use crate::degrees::{harmonic8, sabian_degree, SabianDegree};
use crate::ephemeris::{compute_positions, Ephemeris, EphemerisError, PositionMap};
use crate::input::{BirthData, InputError};
use crate::midpoints::midpoint;
use crate::points::{Point, PointPair};
use crate::symbols::{SymbolTable, SymbolTableError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Symbol data unavailable: {0}")]
    DataUnavailable(#[from] SymbolTableError),
    #[error("Ephemeris failure: {0}")]
    EphemerisFailure(#[from] EphemerisError),
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// A longitude with its sabian degree and symbol label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeReading {
    pub longitude: f64,
    pub sabian: SabianDegree,
    pub symbol: String,
}

impl DegreeReading {
    fn read(longitude: f64, symbols: &SymbolTable) -> Self {
        let sabian = sabian_degree(longitude);
        Self {
            longitude,
            sabian,
            symbol: symbols.lookup(sabian),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NatalRow {
    pub point: Point,
    pub natal: DegreeReading,
    pub harmonic8: DegreeReading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MidpointRow {
    pub pair: PointPair,
    pub midpoint: DegreeReading,
    pub harmonic8: DegreeReading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_meaning: Option<String>,
}

impl MidpointRow {
    pub fn is_important(&self) -> bool {
        self.axis_meaning.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub positions: PositionMap,
    /// One row per point, in chart order
    pub natal: Vec<NatalRow>,
    /// One row per unordered pair, ordered by (i, j) over the chart order
    pub midpoints: Vec<MidpointRow>,
    /// The classified subset of `midpoints`, same relative order
    pub important: Vec<MidpointRow>,
}

impl ChartReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn midpoint_for(&self, a: Point, b: Point) -> Option<&MidpointRow> {
        let pair = PointPair::new(a, b)?;
        self.midpoints.iter().find(|row| row.pair == pair)
    }

    pub fn natal_for(&self, point: Point) -> Option<&NatalRow> {
        self.natal.iter().find(|row| row.point == point)
    }
}

/// Runs chart requests against injected, read-only lookup tables.
pub struct ChartPipeline<'a> {
    ephemeris: &'a dyn Ephemeris,
    symbols: &'a SymbolTable,
    axes: &'a AxisTable,
}

impl<'a> ChartPipeline<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris, symbols: &'a SymbolTable, axes: &'a AxisTable) -> Self {
        Self {
            ephemeris,
            symbols,
            axes,
        }
    }

    /// Compute positions and derive every table. Any ephemeris failure aborts
    /// the request with nothing returned.
    pub fn run(&self, birth: &BirthData) -> Result<ChartReport, ChartError> {
        let positions = compute_positions(self.ephemeris, birth)?;
        Ok(self.build_report(positions))
    }

    /// Validate textual input first; the ephemeris is not consulted when it
    /// is malformed.
    pub fn run_text(
        &self,
        date: &str,
        time: &str,
        latitude: f64,
        longitude: f64,
        utc_offset: &str,
    ) -> Result<ChartReport, ChartError> {
        let birth = BirthData::parse(date, time, latitude, longitude, utc_offset)?;
        self.run(&birth)
    }

    /// Derive natal and halfsum rows from known positions.
    pub fn build_report(&self, positions: PositionMap) -> ChartReport {
        let natal: Vec<NatalRow> = positions
            .iter()
            .map(|(point, lon)| NatalRow {
                point,
                natal: DegreeReading::read(lon, self.symbols),
                harmonic8: DegreeReading::read(harmonic8(lon), self.symbols),
            })
            .collect();

        let entries: Vec<(Point, f64)> = positions.iter().collect();
        let mut midpoints = Vec::with_capacity(entries.len() * entries.len().saturating_sub(1) / 2);
        let mut important = Vec::new();

        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (p1, lon1) = entries[i];
                let (p2, lon2) = entries[j];
                let Some(pair) = PointPair::new(p1, p2) else {
                    continue;
                };

                let mid = midpoint(lon1, lon2);
                let row = MidpointRow {
                    pair,
                    midpoint: DegreeReading::read(mid, self.symbols),
                    harmonic8: DegreeReading::read(harmonic8(mid), self.symbols),
                    axis_meaning: self.axes.classify_pair(&pair).map(str::to_string),
                };

                if row.is_important() {
                    important.push(row.clone());
                }
                midpoints.push(row);
            }
        }

        log::debug!(
            "Chart rows: {} natal, {} halfsums, {} on named axes",
            natal.len(),
            midpoints.len(),
            important.len()
        );

        ChartReport {
            positions,
            natal,
            midpoints,
            important,
        }
    }
}
