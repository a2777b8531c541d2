use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A chart point: one of the ten bodies or one of the two chart angles.
///
/// The declaration order is the chart order used everywhere rows are emitted,
/// and it is also the ordering behind [`PointPair`] canonicalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Point {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Ascendant,
    Midheaven,
}

impl Point {
    /// All points in chart order.
    pub const ALL: [Point; 12] = [
        Point::Sun,
        Point::Moon,
        Point::Mercury,
        Point::Venus,
        Point::Mars,
        Point::Jupiter,
        Point::Saturn,
        Point::Uranus,
        Point::Neptune,
        Point::Pluto,
        Point::Ascendant,
        Point::Midheaven,
    ];

    /// The ten bodies computed one at a time by the ephemeris.
    pub const BODIES: [Point; 10] = [
        Point::Sun,
        Point::Moon,
        Point::Mercury,
        Point::Venus,
        Point::Mars,
        Point::Jupiter,
        Point::Saturn,
        Point::Uranus,
        Point::Neptune,
        Point::Pluto,
    ];

    /// Short label used in tables ("Sun", "ASC", "MC").
    pub fn label(self) -> &'static str {
        match self {
            Point::Sun => "Sun",
            Point::Moon => "Moon",
            Point::Mercury => "Mercury",
            Point::Venus => "Venus",
            Point::Mars => "Mars",
            Point::Jupiter => "Jupiter",
            Point::Saturn => "Saturn",
            Point::Uranus => "Uranus",
            Point::Neptune => "Neptune",
            Point::Pluto => "Pluto",
            Point::Ascendant => "ASC",
            Point::Midheaven => "MC",
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, Point::Ascendant | Point::Midheaven)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chart point: {0}")]
pub struct UnknownPoint(pub String);

impl FromStr for Point {
    type Err = UnknownPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let point = match s.trim().to_lowercase().as_str() {
            "sun" => Point::Sun,
            "moon" => Point::Moon,
            "mercury" => Point::Mercury,
            "venus" => Point::Venus,
            "mars" => Point::Mars,
            "jupiter" => Point::Jupiter,
            "saturn" => Point::Saturn,
            "uranus" => Point::Uranus,
            "neptune" => Point::Neptune,
            "pluto" => Point::Pluto,
            "asc" | "ascendant" => Point::Ascendant,
            "mc" | "midheaven" => Point::Midheaven,
            _ => return Err(UnknownPoint(s.to_string())),
        };
        Ok(point)
    }
}

/// Unordered pair of distinct points, stored with the earlier chart point first.
///
/// Used both when enumerating halfsums and when looking up axes, so
/// `Sun/Jupiter` and `Jupiter/Sun` always hash to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PointPair {
    first: Point,
    second: Point,
}

impl PointPair {
    /// Returns `None` for a self-pair.
    pub fn new(a: Point, b: Point) -> Option<Self> {
        if a == b {
            return None;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Some(Self { first, second })
    }

    pub fn first(&self) -> Point {
        self.first
    }

    pub fn second(&self) -> Point {
        self.second
    }

    pub fn contains(&self, point: Point) -> bool {
        self.first == point || self.second == point
    }

    /// Combination label as shown in tables, e.g. `Sun / Moon`.
    pub fn label(&self) -> String {
        format!("{} / {}", self.first.label(), self.second.label())
    }
}

impl fmt::Display for PointPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_canonical() {
        let a = PointPair::new(Point::Jupiter, Point::Sun).unwrap();
        let b = PointPair::new(Point::Sun, Point::Jupiter).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first(), Point::Sun);
        assert_eq!(a.second(), Point::Jupiter);
        assert_eq!(a.label(), "Sun / Jupiter");
    }

    #[test]
    fn test_self_pair_rejected() {
        assert!(PointPair::new(Point::Moon, Point::Moon).is_none());
    }

    #[test]
    fn test_parse_point_names() {
        assert_eq!("ASC".parse::<Point>().unwrap(), Point::Ascendant);
        assert_eq!("midheaven".parse::<Point>().unwrap(), Point::Midheaven);
        assert_eq!(" Venus ".parse::<Point>().unwrap(), Point::Venus);
        assert!("chiron".parse::<Point>().is_err());
    }

    #[test]
    fn test_chart_order() {
        assert_eq!(Point::ALL.len(), 12);
        assert!(Point::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(Point::BODIES.iter().all(|p| !p.is_angle()));
    }
}
