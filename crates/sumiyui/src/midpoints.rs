//! Halfsum (midpoint) of two ecliptic longitudes.

use crate::degrees::normalize_degrees;

/// Midpoint of two longitudes on the shorter arc between them.
///
/// When the raw separation exceeds 180° the plain average lands on the far
/// side of the circle and is flipped by 180°. A separation of exactly 180°
/// keeps the plain average, so `midpoint(0.0, 180.0)` is 90°.
pub fn midpoint(a: f64, b: f64) -> f64 {
    let a = normalize_degrees(a);
    let b = normalize_degrees(b);
    let diff = (a - b).abs();
    let mid = if diff <= 180.0 {
        (a + b) / 2.0
    } else {
        (a + b) / 2.0 + 180.0
    };
    normalize_degrees(mid)
}

/// Angular distance between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}
