#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use sumiyui::ephemeris::{ChartAngles, Ephemeris, EphemerisError, GeoLocation};
use sumiyui::Point;

/// Ephemeris returning fixed longitudes regardless of the moment.
pub struct FixedEphemeris {
    pub longitudes: HashMap<Point, f64>,
    pub angles: ChartAngles,
    pub fail_on: Option<Point>,
    pub body_calls: Cell<usize>,
    pub house_calls: Cell<usize>,
    pub last_hour_ut: Cell<Option<f64>>,
}

impl FixedEphemeris {
    pub fn new(longitudes: &[(Point, f64)]) -> Self {
        let mut map: HashMap<Point, f64> = longitudes.iter().copied().collect();
        let angles = ChartAngles {
            ascendant: map.remove(&Point::Ascendant).unwrap_or(0.0),
            midheaven: map.remove(&Point::Midheaven).unwrap_or(0.0),
        };
        Self {
            longitudes: map,
            angles,
            fail_on: None,
            body_calls: Cell::new(0),
            house_calls: Cell::new(0),
            last_hour_ut: Cell::new(None),
        }
    }

    pub fn failing_on(mut self, point: Point) -> Self {
        self.fail_on = Some(point);
        self
    }
}

impl Ephemeris for FixedEphemeris {
    fn julian_day(&self, _year: i32, _month: u32, _day: u32, hour_ut: f64) -> f64 {
        self.last_hour_ut.set(Some(hour_ut));
        2_444_240.0 + hour_ut / 24.0
    }

    fn body_longitude(&self, julian_day_ut: f64, body: Point) -> Result<f64, EphemerisError> {
        self.body_calls.set(self.body_calls.get() + 1);
        if self.fail_on == Some(body) {
            return Err(EphemerisError::CalculationFailed {
                point: body,
                julian_day: julian_day_ut,
                message: "stub failure".to_string(),
            });
        }
        Ok(self.longitudes.get(&body).copied().unwrap_or(0.0))
    }

    fn chart_angles(
        &self,
        _julian_day_ut: f64,
        _location: &GeoLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        self.house_calls.set(self.house_calls.get() + 1);
        if self.fail_on.map(|p| p.is_angle()).unwrap_or(false) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: "stub failure".to_string(),
            });
        }
        Ok(self.angles)
    }
}

/// A fixed chart used across tests.
pub const SAMPLE_CHART: [(Point, f64); 12] = [
    (Point::Sun, 280.0),
    (Point::Moon, 100.0),
    (Point::Mercury, 265.5),
    (Point::Venus, 300.25),
    (Point::Mars, 10.0),
    (Point::Jupiter, 160.0),
    (Point::Saturn, 170.0),
    (Point::Uranus, 235.0),
    (Point::Neptune, 260.0),
    (Point::Pluto, 200.0),
    (Point::Ascendant, 15.0),
    (Point::Midheaven, 275.0),
];

pub fn sample_ephemeris() -> FixedEphemeris {
    FixedEphemeris::new(&SAMPLE_CHART)
}
