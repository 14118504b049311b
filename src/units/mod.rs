pub mod cardinal_direction;

pub use cardinal_direction::CardinalDirection;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Units reported by the forecast providers. Everything is requested in metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Celsius,
    KilometersPerHour,
    Meters,
    Seconds,
}

impl Unit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::KilometersPerHour => "km/h",
            Unit::Meters => "m",
            Unit::Seconds => "s",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataParseError {
    InvalidString,
}

impl fmt::Display for DataParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataParseError::InvalidString => write!(f, "invalid string"),
        }
    }
}

impl std::error::Error for DataParseError {}

#[cfg(test)]
mod tests {
    use super::Unit;

    #[test]
    fn unit_abbreviations() {
        assert_eq!(Unit::Celsius.to_string(), "°C");
        assert_eq!(Unit::KilometersPerHour.to_string(), "km/h");
        assert_eq!(Unit::Meters.abbreviation(), "m");
        assert_eq!(Unit::Seconds.abbreviation(), "s");
    }
}
