use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DataParseError;

/// Sixteen point compass, ordered clockwise from north in 22.5 degree steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardinalDirection {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

const COMPASS: [CardinalDirection; 16] = [
    CardinalDirection::North,
    CardinalDirection::NorthNorthEast,
    CardinalDirection::NorthEast,
    CardinalDirection::EastNorthEast,
    CardinalDirection::East,
    CardinalDirection::EastSouthEast,
    CardinalDirection::SouthEast,
    CardinalDirection::SouthSouthEast,
    CardinalDirection::South,
    CardinalDirection::SouthSouthWest,
    CardinalDirection::SouthWest,
    CardinalDirection::WestSouthWest,
    CardinalDirection::West,
    CardinalDirection::WestNorthWest,
    CardinalDirection::NorthWest,
    CardinalDirection::NorthNorthWest,
];

const SECTOR_WIDTH: f64 = 22.5;

impl CardinalDirection {
    /// Maps any degree value onto the compass. Halfway values round to the even
    /// sector, and values outside [0, 360) wrap around.
    pub fn from_degrees(degrees: f64) -> CardinalDirection {
        let sector = (degrees / SECTOR_WIDTH).round_ties_even() as i64;
        COMPASS[sector.rem_euclid(COMPASS.len() as i64) as usize]
    }

    pub fn to_degrees(&self) -> f64 {
        let index = COMPASS.iter().position(|d| d == self).unwrap_or(0);
        index as f64 * SECTOR_WIDTH
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalDirection::North => "N",
            CardinalDirection::NorthNorthEast => "NNE",
            CardinalDirection::NorthEast => "NE",
            CardinalDirection::EastNorthEast => "ENE",
            CardinalDirection::East => "E",
            CardinalDirection::EastSouthEast => "ESE",
            CardinalDirection::SouthEast => "SE",
            CardinalDirection::SouthSouthEast => "SSE",
            CardinalDirection::South => "S",
            CardinalDirection::SouthSouthWest => "SSW",
            CardinalDirection::SouthWest => "SW",
            CardinalDirection::WestSouthWest => "WSW",
            CardinalDirection::West => "W",
            CardinalDirection::WestNorthWest => "WNW",
            CardinalDirection::NorthWest => "NW",
            CardinalDirection::NorthNorthWest => "NNW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardinalDirection {
    type Err = DataParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_uppercase();
        COMPASS
            .iter()
            .find(|d| d.as_str() == s)
            .copied()
            .ok_or(DataParseError::InvalidString)
    }
}
