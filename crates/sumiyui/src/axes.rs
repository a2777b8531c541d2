//! Named axes: point pairs whose halfsum carries a predefined meaning.

use crate::points::{Point, PointPair};
use serde::Serialize;
use std::collections::HashMap;

pub const SUCCESS_AXIS: &str = "Success axis: trigger for social advancement";
pub const HAPPINESS_AXIS: &str = "Happiness axis: emotional fulfilment and abundance";
pub const FAMILY_AXIS: &str = "Family / marriage axis: integration of public and private life";
pub const LEAP_AXIS: &str = "Leap axis: drive joined to expansion";
pub const ENDURANCE_AXIS: &str = "Endurance axis: rebuilding from the foundations";
pub const FORTUNE_AXIS: &str = "Fortune axis: sudden system update";
pub const VITALITY_AXIS: &str = "Health / self-expression axis: tuning vitality";
pub const CAREER_AXIS: &str = "Social success axis: the biggest career opportunity";

/// Standard axis table, in the order the axes are usually presented.
const STANDARD_AXES: &[(Point, Point, &str)] = &[
    (Point::Sun, Point::Jupiter, SUCCESS_AXIS),
    (Point::Venus, Point::Jupiter, HAPPINESS_AXIS),
    (Point::Sun, Point::Moon, FAMILY_AXIS),
    (Point::Mars, Point::Jupiter, LEAP_AXIS),
    (Point::Saturn, Point::Pluto, ENDURANCE_AXIS),
    (Point::Jupiter, Point::Uranus, FORTUNE_AXIS),
    (Point::Sun, Point::Ascendant, VITALITY_AXIS),
    (Point::Midheaven, Point::Jupiter, CAREER_AXIS),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisDefinition {
    pub pair: PointPair,
    pub meaning: String,
}

/// Read-only lookup from an unordered point pair to its meaning.
#[derive(Debug, Clone, Default)]
pub struct AxisTable {
    axes: HashMap<PointPair, String>,
}

impl AxisTable {
    /// The built-in eight-axis table.
    pub fn standard() -> Self {
        Self::from_entries(
            STANDARD_AXES
                .iter()
                .map(|(a, b, meaning)| (*a, *b, meaning.to_string())),
        )
    }

    /// Build a table from `(a, b, meaning)` entries.
    ///
    /// Self-pairs are skipped. A later entry for the same pair replaces the
    /// earlier one regardless of the order the two points were given in.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Point, Point, String)>,
    {
        let mut axes = HashMap::new();
        for (a, b, meaning) in entries {
            match PointPair::new(a, b) {
                Some(pair) => {
                    axes.insert(pair, meaning);
                }
                None => log::warn!("Ignoring axis on a single point: {}", a),
            }
        }
        Self { axes }
    }

    /// Meaning of the axis formed by `a` and `b`, in either order.
    pub fn classify(&self, a: Point, b: Point) -> Option<&str> {
        PointPair::new(a, b).and_then(|pair| self.classify_pair(&pair))
    }

    pub fn classify_pair(&self, pair: &PointPair) -> Option<&str> {
        self.axes.get(pair).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Definitions sorted by pair in chart order.
    pub fn definitions(&self) -> Vec<AxisDefinition> {
        let mut defs: Vec<AxisDefinition> = self
            .axes
            .iter()
            .map(|(pair, meaning)| AxisDefinition {
                pair: *pair,
                meaning: meaning.clone(),
            })
            .collect();
        defs.sort_by_key(|d| d.pair);
        defs
    }
}
