use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::data::parseable_data_record::DataRecordParsingError;
use crate::error::FerryError;
use crate::location::Location;

/// The only range label the published schedules use
pub const WEEKDAY_RANGE_LABEL: &str = "Monday to Friday";

const REQUIRED_COLUMNS: [&str; 4] = ["Location", "Day", "Time", "Ferry"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dock {
    #[serde(rename = "Bell Island")]
    BellIsland,
    #[serde(rename = "Portugal Cove")]
    PortugalCove,
}

impl Dock {
    pub const ALL: [Dock; 2] = [Dock::BellIsland, Dock::PortugalCove];

    pub fn name(&self) -> &'static str {
        match self {
            Dock::BellIsland => "Bell Island",
            Dock::PortugalCove => "Portugal Cove",
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Dock::BellIsland => Location::new(47.6274, -52.9395, self.name().into()),
            Dock::PortugalCove => Location::new(47.6196, -52.8672, self.name().into()),
        }
    }
}

impl fmt::Display for Dock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dock {
    type Err = DataRecordParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "bell island" => Ok(Dock::BellIsland),
            "portugal cove" => Ok(Dock::PortugalCove),
            _ => Err(DataRecordParsingError::ParseFailure(format!("unknown dock {s}"))),
        }
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Whether a schedule day label covers the weekday. Labels are compared
/// literally; the weekday range label is the only one that expands.
pub fn day_matches(day_label: &str, weekday: Weekday) -> bool {
    if day_label == WEEKDAY_RANGE_LABEL {
        return weekday.num_days_from_monday() < 5;
    }
    day_label == weekday_name(weekday)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "Location")]
    pub dock: Dock,
    #[serde(rename = "Day")]
    pub day_label: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Ferry")]
    pub ferry_name: String,
}

impl ScheduleEntry {
    pub fn runs_on(&self, dock: Dock, weekday: Weekday) -> bool {
        self.dock == dock && day_matches(&self.day_label, weekday)
    }
}

/// One schedule variant as loaded from its CSV file. Read only once loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleTable {
    entries: Vec<ScheduleEntry>,
}

impl ScheduleTable {
    /// Reads `Location,Day,Time,Ferry` rows. Rows that do not deserialize are
    /// skipped, a header without the required columns fails the whole table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataRecordParsingError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| DataRecordParsingError::ParseFailure(e.to_string()))?;
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(DataRecordParsingError::ParseFailure(format!(
                "schedule is missing the {missing} column"
            )));
        }

        let entries = reader
            .deserialize::<ScheduleEntry>()
            .enumerate()
            .filter_map(|(i, row)| match row {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping schedule row {}: {}", i + 1, e);
                    None
                }
            })
            .collect();

        Ok(ScheduleTable { entries })
    }

    pub fn from_data(data: &str) -> Result<Self, DataRecordParsingError> {
        Self::from_reader(data.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FerryError> {
        let path = path.as_ref();
        let unavailable = |reason: String| FerryError::DataSourceUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
        let table = Self::from_reader(file).map_err(|e| unavailable(e.to_string()))?;
        log::info!("Loaded {} schedule entries from {:?}", table.entries.len(), path);
        Ok(table)
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Departures from the dock on the weekday, in file order
    pub fn entries_for(&self, dock: Dock, weekday: Weekday) -> Vec<ScheduleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.runs_on(dock, weekday))
            .cloned()
            .collect()
    }
}
