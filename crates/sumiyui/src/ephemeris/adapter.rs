use crate::ephemeris::types::{ChartAngles, GeoLocation, PositionMap};
use crate::input::BirthData;
use crate::points::Point;
use chrono::Datelike;
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {point} at JD {julian_day}: {message}")]
    CalculationFailed {
        point: Point,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Narrow interface over an astronomical engine.
///
/// [`compute_positions`] drives it once per body plus one house computation,
/// so the rest of the crate never depends on a particular engine.
pub trait Ephemeris {
    /// Julian day (UT) for a Gregorian calendar date and a UT hour fraction.
    ///
    /// The hour may fall outside 0..24 after a UTC offset is subtracted.
    fn julian_day(&self, year: i32, month: u32, day: u32, hour_ut: f64) -> f64 {
        // GREG_CAL = 1
        julday(year, month as i32, day as i32, hour_ut, 1)
    }

    /// Ecliptic longitude of one body, in degrees.
    fn body_longitude(&self, julian_day_ut: f64, body: Point) -> Result<f64, EphemerisError>;

    /// Ascendant and midheaven for the chart's fixed house system.
    fn chart_angles(
        &self,
        julian_day_ut: f64,
        location: &GeoLocation,
    ) -> Result<ChartAngles, EphemerisError>;
}

/// Compute all ten bodies and both angles for a birth moment.
///
/// The first failing call aborts the whole computation; no partial map is
/// ever returned.
pub fn compute_positions(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
) -> Result<PositionMap, EphemerisError> {
    let jd = ephemeris.julian_day(
        birth.date.year(),
        birth.date.month(),
        birth.date.day(),
        birth.universal_hour(),
    );
    log::debug!(
        "Computing positions for {} {} (UTC{:+}) -> JD {:.6}",
        birth.date,
        birth.time,
        birth.utc_offset_hours,
        jd
    );

    let mut longitudes = Vec::with_capacity(Point::ALL.len());
    for body in Point::BODIES {
        let lon = ephemeris.body_longitude(jd, body)?;
        if !lon.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                point: body,
                julian_day: jd,
                message: format!("non-finite longitude {}", lon),
            });
        }
        longitudes.push((body, lon));
    }

    let angles = ephemeris.chart_angles(jd, &birth.location)?;
    if !angles.ascendant.is_finite() || !angles.midheaven.is_finite() {
        return Err(EphemerisError::HouseCalculationFailed {
            message: format!(
                "non-finite angles (asc {}, mc {}) at latitude {}",
                angles.ascendant, angles.midheaven, birth.location.lat
            ),
        });
    }
    longitudes.push((Point::Ascendant, angles.ascendant));
    longitudes.push((Point::Midheaven, angles.midheaven));

    Ok(longitudes.into_iter().collect())
}

// Swiss Ephemeris planet IDs: SUN=0 .. PLUTO=9
const PLANET_IDS: &[(Point, i32)] = &[
    (Point::Sun, 0),
    (Point::Moon, 1),
    (Point::Mercury, 2),
    (Point::Venus, 3),
    (Point::Mars, 4),
    (Point::Jupiter, 5),
    (Point::Saturn, 6),
    (Point::Uranus, 7),
    (Point::Neptune, 8),
    (Point::Pluto, 9),
];

/// Placidus
const HOUSE_SYSTEM: u8 = b'P';

const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// An explicit path must exist. Without one, `SWISS_EPHEMERIS_PATH` and
    /// then the default install location are tried, and the analytical
    /// Moshier model is used when no data directory is found.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        if let Some(path) = ephemeris_path {
            if !path.exists() {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            return Self::with_data_files(path);
        }

        let path = env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH));
        if path.exists() {
            Self::with_data_files(path)
        } else {
            log::info!(
                "No Swiss Ephemeris data at {}; using the Moshier model",
                path.display()
            );
            Ok(Self::moshier())
        }
    }

    /// Adapter that never touches data files.
    pub fn moshier() -> Self {
        Self {
            ephemeris_path: None,
            flags: FLG_MOSEPH,
        }
    }

    /// Point the engine at `path`. The search path is process-wide state in
    /// Swiss Ephemeris, so the last adapter created wins.
    fn with_data_files(path: PathBuf) -> Result<Self, EphemerisError> {
        let path_str = ephemeris_path_str(&path)?;
        set_ephe_path(path_str);
        log::debug!("Using Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: Some(path),
            flags: FLG_SWIEPH,
        })
    }

    pub fn ephemeris_path(&self) -> Option<&PathBuf> {
        self.ephemeris_path.as_ref()
    }
}

/// The engine takes the path as a C string.
fn ephemeris_path_str(path: &Path) -> Result<&str, EphemerisError> {
    match path.to_str() {
        Some(s) if !s.contains('\0') => Ok(s),
        _ => Err(EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path must be valid UTF-8 without NUL bytes.".to_string(),
        }),
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn body_longitude(&self, julian_day_ut: f64, body: Point) -> Result<f64, EphemerisError> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(point, _)| *point == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                point: body,
                julian_day: julian_day_ut,
                message: "not a body".to_string(),
            })?;

        let result = calc_ut(julian_day_ut, planet_code as u32, self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                point: body,
                julian_day: julian_day_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        Ok(result.out[0] % 360.0)
    }

    fn chart_angles(
        &self,
        julian_day_ut: f64,
        location: &GeoLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        use swisseph::AscMc;

        // Angles do not depend on the house system; Swiss Ephemeris falls back
        // to Porphyry cusps inside the polar circles.
        let (_cusps, ascmc) = houses_ex(
            julian_day_ut,
            0,
            location.lat,
            location.lon,
            HOUSE_SYSTEM as i32,
        );
        let ascmc = AscMc::from_array(ascmc);

        Ok(ChartAngles {
            ascendant: ascmc.ascendant % 360.0,
            midheaven: ascmc.mc % 360.0,
        })
    }
}
