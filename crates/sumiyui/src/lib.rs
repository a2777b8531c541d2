//! Natal chart halfsums mapped onto sabian degree symbols.
//!
//! Positions come from an [`ephemeris::Ephemeris`] implementation, every
//! unordered pair of chart points is reduced to its midpoint, and both the
//! natal and 8th-harmonic longitudes are labelled through a [`SymbolTable`].

pub mod axes;
pub mod degrees;
pub mod ephemeris;
pub mod export;
pub mod input;
pub mod midpoints;
pub mod pipeline;
pub mod points;
pub mod symbols;

pub use axes::{AxisDefinition, AxisTable};
pub use degrees::{harmonic, harmonic8, normalize_degrees, sabian_degree, SabianDegree};
pub use ephemeris::{
    compute_positions, ChartAngles, Ephemeris, EphemerisError, GeoLocation, PositionMap,
    SwissEphemerisAdapter,
};
pub use input::{BirthData, InputError};
pub use midpoints::midpoint;
pub use pipeline::{ChartError, ChartPipeline, ChartReport, MidpointRow, NatalRow};
pub use points::{Point, PointPair};
pub use symbols::{SymbolTable, SymbolTableError};
