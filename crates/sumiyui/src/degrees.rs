//! Degree utilities: normalisation, sabian degree numbering and harmonics.
//!
//! A sabian degree counts whole degrees of the zodiac from 1 to 360, so
//! 0°00' through 0°59' Aries is degree 1 and 29°xx' Pisces is degree 360.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const FULL_CIRCLE: f64 = 360.0;

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(FULL_CIRCLE);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= FULL_CIRCLE {
        0.0
    } else {
        normalized
    }
}

/// 1-based whole-degree index into the sabian symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SabianDegree(u16);

impl SabianDegree {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 360;

    /// Returns `None` outside 1..=360.
    pub fn new(index: u16) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&index).then_some(Self(index))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Every degree from 1 to 360 in order.
    pub fn all() -> impl Iterator<Item = SabianDegree> {
        (Self::MIN..=Self::MAX).map(SabianDegree)
    }
}

impl fmt::Display for SabianDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// `floor(longitude mod 360) + 1`, always within 1..=360.
pub fn sabian_degree(longitude: f64) -> SabianDegree {
    let whole = normalize_degrees(longitude).floor();
    // NaN casts to 0, which keeps the result in range
    let index = (whole as u16).min(SabianDegree::MAX - 1) + 1;
    SabianDegree(index)
}

/// Longitude of the n-th harmonic chart: `(longitude * n) mod 360`.
pub fn harmonic(longitude: f64, n: u32) -> f64 {
    normalize_degrees(longitude * f64::from(n))
}

/// 8th harmonic longitude. Period 45° in the input.
pub fn harmonic8(longitude: f64) -> f64 {
    harmonic(longitude, 8)
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(725.5), 5.5);
        assert_eq!(normalize_degrees(-1e-15), 0.0);
    }

    #[test]
    fn test_sabian_degree_boundaries() {
        assert_eq!(sabian_degree(0.0).get(), 1);
        assert_eq!(sabian_degree(0.999).get(), 1);
        assert_eq!(sabian_degree(1.0).get(), 2);
        assert_eq!(sabian_degree(280.0).get(), 281);
        assert_eq!(sabian_degree(359.999).get(), 360);
        assert_eq!(sabian_degree(360.0).get(), 1);
        assert_eq!(sabian_degree(-0.5).get(), 360);
    }

    #[test]
    fn test_sabian_degree_in_range_and_periodic() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let idx = sabian_degree(lon);
            assert!((1..=360).contains(&idx.get()), "lon {} -> {}", lon, idx);
            assert_eq!(idx, sabian_degree(lon + 360.0), "lon {}", lon);
            lon += 0.25;
        }
    }

    #[test]
    fn test_sabian_degree_new() {
        assert!(SabianDegree::new(0).is_none());
        assert!(SabianDegree::new(361).is_none());
        assert_eq!(SabianDegree::new(360).unwrap().get(), 360);
        assert_eq!(SabianDegree::all().count(), 360);
    }

    #[test]
    fn test_harmonic8() {
        assert_eq!(harmonic8(0.0), 0.0);
        assert_eq!(harmonic8(280.0), 80.0);
        assert_eq!(harmonic8(45.0), 0.0);
        assert_eq!(harmonic8(190.0), 80.0);
        assert_eq!(harmonic(100.0, 1), 100.0);
    }

    #[test]
    fn test_harmonic8_has_period_45() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let a = harmonic8(lon);
            let b = harmonic8(lon + 45.0);
            let diff = (a - b).abs();
            assert!(diff < 1e-9 || (360.0 - diff) < 1e-9, "lon {}: {} vs {}", lon, a, b);
            assert!((0.0..360.0).contains(&a));
            lon += 0.5;
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(123.456), 123.46);
        assert_eq!(round2(0.004), 0.0);
    }
}
