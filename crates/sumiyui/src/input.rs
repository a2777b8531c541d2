//! Birth data supplied by the caller, and its parsing from text.

use crate::ephemeris::GeoLocation;
use chrono::{NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest offset in use anywhere (UTC+14, Line Islands).
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time {0:?}: expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    #[error("Invalid {axis} {value}: must be within ±{limit}")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("Invalid UTC offset {0:?}: expected hours like 9, -3.5 or +09:00 within ±14")]
    InvalidUtcOffset(String),
}

lazy_static::lazy_static! {
    static ref DECIMAL_OFFSET: Regex = Regex::new(r"^[+-]?\d{1,2}(\.\d+)?$").expect("valid offset pattern");
    static ref CLOCK_OFFSET: Regex = Regex::new(r"^([+-])?(\d{1,2}):([0-5]\d)$").expect("valid offset pattern");
}

/// Local civil birth moment and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: GeoLocation,
    /// Hours east of UTC, e.g. 9.0 for JST
    pub utc_offset_hours: f64,
}

impl BirthData {
    /// Validate already-typed values.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
    ) -> Result<Self, InputError> {
        check_coordinate("latitude", latitude, 90.0)?;
        check_coordinate("longitude", longitude, 180.0)?;
        if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(InputError::InvalidUtcOffset(utc_offset_hours.to_string()));
        }
        Ok(Self {
            date,
            time,
            location: GeoLocation {
                lat: latitude,
                lon: longitude,
            },
            utc_offset_hours,
        })
    }

    /// Parse date, time and UTC offset from text.
    pub fn parse(
        date: &str,
        time: &str,
        latitude: f64,
        longitude: f64,
        utc_offset: &str,
    ) -> Result<Self, InputError> {
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        let offset = parse_utc_offset(utc_offset)?;
        Self::new(date, time, latitude, longitude, offset)
    }

    /// Local clock hour fraction minus the UTC offset.
    ///
    /// May be negative or exceed 24; the Julian day conversion absorbs the
    /// day rollover.
    pub fn universal_hour(&self) -> f64 {
        let local = f64::from(self.time.hour())
            + f64::from(self.time.minute()) / 60.0
            + f64::from(self.time.second()) / 3600.0;
        local - self.utc_offset_hours
    }
}

fn check_coordinate(axis: &'static str, value: f64, limit: f64) -> Result<(), InputError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(InputError::InvalidCoordinate { axis, value, limit })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(s.to_string()))
}

pub fn parse_time(s: &str) -> Result<NaiveTime, InputError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| InputError::InvalidTime(s.to_string()))
}

/// Parse `9`, `-3.5`, `+5.75` or `+09:00` into decimal hours.
pub fn parse_utc_offset(s: &str) -> Result<f64, InputError> {
    let trimmed = s.trim();
    let invalid = || InputError::InvalidUtcOffset(s.to_string());

    let hours = if DECIMAL_OFFSET.is_match(trimmed) {
        trimmed.parse::<f64>().map_err(|_| invalid())?
    } else if let Some(caps) = CLOCK_OFFSET.captures(trimmed) {
        let sign = if caps.get(1).map(|m| m.as_str()) == Some("-") {
            -1.0
        } else {
            1.0
        };
        let h: f64 = caps[2].parse().map_err(|_| invalid())?;
        let m: f64 = caps[3].parse().map_err(|_| invalid())?;
        sign * (h + m / 60.0)
    } else {
        return Err(invalid());
    };

    if hours.abs() > MAX_UTC_OFFSET_HOURS {
        return Err(invalid());
    }
    Ok(hours)
}
