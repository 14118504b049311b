use chrono::{DateTime, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::forecast::HourlyRecord;
use crate::tools::serde::optional_f64_vec;
use crate::units::CardinalDirection;

use super::parseable_data_record::DataRecordParsingError;

// https://marine-api.open-meteo.com/v1/marine?latitude=47.6274&longitude=-52.9395&hourly=wave_height,wave_period&timezone=America/St_Johns&start_date=2024-07-02&end_date=2024-07-02

/// One hour of the marine forecast. Heights in meters, periods in seconds,
/// directions in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarineForecastDataRecord {
    /// ISO 8601 timestamp already expressed in the requested local zone
    pub time: String,
    pub wave_height: Option<f64>,
    pub wave_period: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wind_wave_height: Option<f64>,
    pub wind_wave_period: Option<f64>,
    pub wind_wave_direction: Option<f64>,
    pub swell_wave_height: Option<f64>,
    pub swell_wave_period: Option<f64>,
    pub swell_wave_direction: Option<f64>,
}

impl MarineForecastDataRecord {
    pub fn timestamp(&self) -> Result<NaiveDateTime, DataRecordParsingError> {
        NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| DateTime::parse_from_rfc3339(&self.time).map(|d| d.naive_local()))
            .map_err(|_| DataRecordParsingError::InvalidTimestamp(self.time.clone()))
    }

    pub fn wave_cardinal_direction(&self) -> Option<CardinalDirection> {
        self.wave_direction.map(CardinalDirection::from_degrees)
    }
}

impl HourlyRecord for MarineForecastDataRecord {
    fn time_of_day(&self) -> Result<NaiveTime, DataRecordParsingError> {
        self.timestamp().map(|t| t.time())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct MarineHourlyData {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    wave_height: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    wave_period: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    wave_direction: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    wind_wave_height: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    wind_wave_period: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    wind_wave_direction: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    swell_wave_height: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    swell_wave_period: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "optional_f64_vec")]
    swell_wave_direction: Vec<Option<f64>>,
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarineForecastDataRecordCollection {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    hourly: MarineHourlyData,
}

impl MarineForecastDataRecordCollection {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Splits the column arrays into one record per timestamp. Columns shorter
    /// than `time` leave the missing hours empty.
    pub fn records(&self) -> Vec<MarineForecastDataRecord> {
        let hourly = &self.hourly;
        hourly
            .time
            .iter()
            .enumerate()
            .map(|(i, time)| MarineForecastDataRecord {
                time: time.clone(),
                wave_height: value_at(&hourly.wave_height, i),
                wave_period: value_at(&hourly.wave_period, i),
                wave_direction: value_at(&hourly.wave_direction, i),
                wind_wave_height: value_at(&hourly.wind_wave_height, i),
                wind_wave_period: value_at(&hourly.wind_wave_period, i),
                wind_wave_direction: value_at(&hourly.wind_wave_direction, i),
                swell_wave_height: value_at(&hourly.swell_wave_height, i),
                swell_wave_period: value_at(&hourly.swell_wave_period, i),
                swell_wave_direction: value_at(&hourly.swell_wave_direction, i),
            })
            .collect()
    }
}
