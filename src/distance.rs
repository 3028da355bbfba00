//! Race distances and their fixed lap layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::DEFAULT_DISTANCE_M;

/// Static description of how a race distance is skated on a 400m oval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceProfile {
    pub meters: u32,
    /// Length of the first, shorter lap.
    pub opening_m: u32,
    /// Number of full 400m laps after the opening.
    pub laps: u32,
    /// Share of the race time spent on the opening when nothing is locked.
    pub default_opening_fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distance {
    M500,
    M1000,
    M1500,
    M3000,
    M5000,
    M10000,
}

impl Distance {
    pub const ALL: [Distance; 6] = [
        Distance::M500,
        Distance::M1000,
        Distance::M1500,
        Distance::M3000,
        Distance::M5000,
        Distance::M10000,
    ];

    pub fn profile(self) -> DistanceProfile {
        let (meters, opening_m, laps, default_opening_fraction) = match self {
            Distance::M500 => (500, 100, 1, 0.275),
            Distance::M1000 => (1000, 200, 2, 0.24),
            Distance::M1500 => (1500, 300, 3, 0.23),
            Distance::M3000 => (3000, 200, 6, 0.09),
            Distance::M5000 => (5000, 200, 12, 0.05),
            Distance::M10000 => (10000, 400, 24, 0.045),
        };
        DistanceProfile {
            meters,
            opening_m,
            laps,
            default_opening_fraction,
        }
    }

    pub fn meters(self) -> u32 {
        self.profile().meters
    }

    pub fn laps(self) -> u32 {
        self.profile().laps
    }

    /// Key used in the query string and the distance select.
    pub fn key(self) -> String {
        self.meters().to_string()
    }

    pub fn label(self) -> String {
        format!("{}m", self.meters())
    }

    pub fn from_meters(meters: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.meters() == meters)
    }
}

impl Default for Distance {
    fn default() -> Self {
        // DEFAULT_DISTANCE_M is always one of the table entries
        Self::from_meters(DEFAULT_DISTANCE_M).unwrap_or(Distance::M5000)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.meters())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDistanceError {
    #[error("distance cannot be empty")]
    Empty,
    #[error("'{0}' is not a distance in meters")]
    NotANumber(String),
    #[error("{0}m is not a supported race distance")]
    Unsupported(u32),
}

impl FromStr for Distance {
    type Err = ParseDistanceError;

    /// Accepts only the exact profile keys (`500`, `1000`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseDistanceError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseDistanceError::NotANumber(s.to_string()));
        }
        let meters: u32 = s
            .parse()
            .map_err(|_| ParseDistanceError::NotANumber(s.to_string()))?;
        let distance = Self::from_meters(meters).ok_or(ParseDistanceError::Unsupported(meters))?;
        // "05000" parses to a valid number but is not a key
        if distance.key() != s {
            return Err(ParseDistanceError::NotANumber(s.to_string()));
        }
        Ok(distance)
    }
}
