use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::forecast::HourlyRecord;
use crate::tools::serde::optional_f64;
use crate::units::CardinalDirection;

use super::parseable_data_record::DataRecordParsingError;

// https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/47.6274,-52.9395/2024-07-02?unitGroup=metric&include=hours&key=KEY

/// One hour of the atmospheric forecast, metric units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecastDataRecord {
    /// Naive local wall clock, "HH:MM:SS"
    #[serde(rename = "datetime")]
    pub time: String,
    #[serde(rename = "temp", default, deserialize_with = "optional_f64")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "winddir", default, deserialize_with = "optional_f64")]
    pub wind_direction: Option<f64>,
    #[serde(rename = "windspeed", default, deserialize_with = "optional_f64")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "windgust", default, deserialize_with = "optional_f64")]
    pub wind_gust: Option<f64>,
}

impl WeatherForecastDataRecord {
    pub fn wind_cardinal_direction(&self) -> Option<CardinalDirection> {
        self.wind_direction.map(CardinalDirection::from_degrees)
    }
}

impl HourlyRecord for WeatherForecastDataRecord {
    fn time_of_day(&self) -> Result<NaiveTime, DataRecordParsingError> {
        NaiveTime::parse_from_str(&self.time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.time, "%H:%M"))
            .map_err(|_| DataRecordParsingError::InvalidTimestamp(self.time.clone()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct WeatherForecastDay {
    datetime: String,
    #[serde(default)]
    hours: Vec<WeatherForecastDataRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecastDataRecordCollection {
    #[serde(default)]
    pub resolved_address: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    days: Vec<WeatherForecastDay>,
}

impl WeatherForecastDataRecordCollection {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// The requested calendar day, when the provider reports a readable one
    pub fn date(&self) -> Option<NaiveDate> {
        self.days
            .first()
            .and_then(|day| NaiveDate::parse_from_str(&day.datetime, "%Y-%m-%d").ok())
    }

    /// Hourly records of the first (requested) day, in provider order
    pub fn records(&self) -> &[WeatherForecastDataRecord] {
        self.days
            .first()
            .map(|day| day.hours.as_slice())
            .unwrap_or(&[])
    }
}
