use crate::degrees::normalize_degrees;
use crate::points::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

/// Chart angles from a single house computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
}

/// Ecliptic longitude of every computed chart point.
///
/// Longitudes are normalized to [0, 360) on construction and iteration
/// follows chart order (Sun first, Midheaven last).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PositionMap {
    longitudes: BTreeMap<Point, f64>,
}

impl PositionMap {
    pub fn get(&self, point: Point) -> Option<f64> {
        self.longitudes.get(&point).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.longitudes.iter().map(|(p, lon)| (*p, *lon))
    }

    pub fn points(&self) -> Vec<Point> {
        self.longitudes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    /// True when all ten bodies and both angles are present.
    pub fn is_complete(&self) -> bool {
        Point::ALL.iter().all(|p| self.longitudes.contains_key(p))
    }
}

impl FromIterator<(Point, f64)> for PositionMap {
    fn from_iter<I: IntoIterator<Item = (Point, f64)>>(iter: I) -> Self {
        let longitudes = iter
            .into_iter()
            .map(|(p, lon)| (p, normalize_degrees(lon)))
            .collect();
        Self { longitudes }
    }
}
