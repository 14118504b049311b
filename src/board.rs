use std::fmt;

use chrono::{DateTime, Days, NaiveDate};
use chrono_tz::Tz;
use itertools::Itertools;

use crate::advisory::{
    classify_wave_advisory, classify_wind_advisory, Advisory, WaveAdvisoryLevel, WindAdvisoryLevel,
};
use crate::data::marine_forecast_data_record::MarineForecastDataRecordCollection;
use crate::data::weather_forecast_data_record::WeatherForecastDataRecordCollection;
use crate::departure::{build_departure_rows, DepartureRow};
use crate::error::FerryError;
use crate::forecast::{build_hourly_lookup, HourlyLookup};
use crate::schedule::{Dock, ScheduleEntry};

/// Number of days, starting today, a rider can pick from
pub const SELECTABLE_DAYS: u64 = 7;

pub fn selectable_dates(now: &DateTime<Tz>) -> Vec<NaiveDate> {
    let today = now.date_naive();
    (0..SELECTABLE_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// "Tuesday, Jul 02"
pub fn day_label(date: &NaiveDate) -> String {
    date.format("%A, %b %d").to_string()
}

/// An advisory line for the selected day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub is_warning: bool,
}

/// Everything shown for one dock and day: advisories plus the merged departures
#[derive(Clone, Debug, PartialEq)]
pub struct DepartureBoard {
    pub dock: Dock,
    pub date: NaiveDate,
    pub wind_advisory: Advisory<WindAdvisoryLevel>,
    /// `None` when the marine forecast could not be fetched
    pub wave_advisory: Option<Advisory<WaveAdvisoryLevel>>,
    pub rows: Vec<DepartureRow>,
    pub notices: Vec<String>,
}

impl DepartureBoard {
    /// Runs the lookup, advisory and merge steps over one selection.
    ///
    /// A failed atmospheric fetch fails the whole board. A failed marine fetch
    /// only removes the wave fields and leaves a notice.
    pub fn compose(
        entries: &[ScheduleEntry],
        dock: Dock,
        date: NaiveDate,
        now: &DateTime<Tz>,
        weather: Result<WeatherForecastDataRecordCollection, FerryError>,
        marine: Result<MarineForecastDataRecordCollection, FerryError>,
    ) -> Result<DepartureBoard, FerryError> {
        let weather = weather?;
        let mut notices = Vec::new();

        if let Some(forecast_date) = weather.date() {
            if forecast_date != date {
                log::warn!("Forecast is for {} but {} was requested", forecast_date, date);
                notices.push(format!(
                    "The weather forecast returned is for {}, not {}.",
                    day_label(&forecast_date),
                    day_label(&date)
                ));
            }
        }

        let weather_records = weather.records();
        let weather_lookup = build_hourly_lookup(weather_records);
        let wind_advisory = classify_wind_advisory(weather_records);

        let (marine_lookup, wave_advisory) = match marine {
            Ok(marine) => {
                let records = marine.records();
                (build_hourly_lookup(&records), Some(classify_wave_advisory(&records)))
            }
            Err(e) => {
                log::warn!("Continuing without wave data: {}", e);
                notices.push(format!("Wave forecast unavailable: {}", e));
                (HourlyLookup::default(), None)
            }
        };

        let rows = build_departure_rows(entries, &weather_lookup, &marine_lookup, date, now);
        log::debug!("Composed {} departures for {} on {}", rows.len(), dock, date);

        Ok(DepartureBoard {
            dock,
            date,
            wind_advisory,
            wave_advisory,
            rows,
            notices,
        })
    }

    pub fn day_label(&self) -> String {
        day_label(&self.date)
    }

    /// Wind then wave advisory lines, skipping levels with nothing to report
    pub fn banners(&self) -> Vec<Banner> {
        let day = self.day_label();
        let wind = self.wind_advisory.message(&day).map(|message| Banner {
            message,
            is_warning: self.wind_advisory.is_warning(),
        });
        let waves = self.wave_advisory.as_ref().and_then(|advisory| {
            advisory.message(&day).map(|message| Banner {
                message,
                is_warning: advisory.is_warning(),
            })
        });

        wind.into_iter().chain(waves).collect()
    }
}

impl fmt::Display for DepartureBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let day = self.day_label();
        writeln!(f, "Schedule and Weather for {} at {}", day, self.dock)?;

        for banner in self.banners() {
            writeln!(f, "{}", banner.message)?;
        }
        for notice in &self.notices {
            writeln!(f, "Note: {}", notice)?;
        }

        write!(f, "{}", self.rows.iter().map(|row| row.to_string()).join("\n"))
    }
}
