pub mod adapter;
pub mod types;

pub use adapter::{compute_positions, Ephemeris, EphemerisError, SwissEphemerisAdapter};
pub use types::{ChartAngles, GeoLocation, PositionMap};
