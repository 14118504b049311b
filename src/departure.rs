use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use regex::Regex;
use serde::Serialize;

use crate::data::marine_forecast_data_record::MarineForecastDataRecord;
use crate::data::weather_forecast_data_record::WeatherForecastDataRecord;
use crate::forecast::HourlyLookup;
use crate::schedule::ScheduleEntry;
use crate::tools::clock::{bind_to_date, parse_clock_time, round_to_nearest_hour};
use crate::units::{CardinalDirection, Unit};

/// Placeholder for any forecast field that could not be matched
pub const UNAVAILABLE: &str = "data not available";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TemporalStatus {
    Departed,
    NextDeparture,
    Future,
}

impl fmt::Display for TemporalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            TemporalStatus::Departed => "departed",
            TemporalStatus::NextDeparture => "next departure",
            TemporalStatus::Future => "scheduled",
        };
        write!(f, "{}", label)
    }
}

const VESSEL_PREFIX_PATTERN: &str = r"(?i)^\s*m\.?\s?v\.?\s+";
const MAINTENANCE_TAG_PATTERN: &str = r"(?i)[\s\-]*[(\[]?\s*maintenance\s*[)\]]?";

fn vessel_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(VESSEL_PREFIX_PATTERN).expect("vessel prefix pattern compiles"))
}

fn maintenance_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(MAINTENANCE_TAG_PATTERN).expect("maintenance tag pattern compiles"))
}

/// Short display name of the vessel plus whether the sailing is a maintenance run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FerryLabel {
    pub name: String,
    pub maintenance: bool,
}

impl FerryLabel {
    pub fn from_ferry_name(ferry_name: &str) -> FerryLabel {
        let maintenance = maintenance_tag().is_match(ferry_name);
        let name = maintenance_tag().replace_all(ferry_name, " ");
        let name = vessel_prefix().replace(&name, "");

        let name = name.trim();
        FerryLabel {
            name: if name.is_empty() {
                ferry_name.trim().to_string()
            } else {
                name.to_string()
            },
            maintenance,
        }
    }
}

impl fmt::Display for FerryLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.maintenance {
            write!(f, "{} [maintenance]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Glyph for a timeline api icon name
pub fn condition_glyph(icon: &str) -> &'static str {
    match icon {
        "clear-day" => "☀️",
        "clear-night" => "🌙",
        "partly-cloudy-day" => "⛅",
        "partly-cloudy-night" => "☁️",
        "cloudy" => "☁️",
        "rain" | "showers-day" | "showers-night" => "🌧️",
        "snow" | "snow-showers-day" | "snow-showers-night" => "🌨️",
        "thunder-rain" | "thunder-showers-day" | "thunder-showers-night" => "⛈️",
        "fog" => "🌫️",
        "wind" => "💨",
        _ => "🌡️",
    }
}

fn optional_text(value: Option<f64>, unit: Unit, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*} {}", precision, v, unit.abbreviation()),
        None => "N/A".to_string(),
    }
}

/// Atmospheric fields matched to a departure
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeatherConditions {
    pub temperature: Option<f64>,
    pub conditions: Option<String>,
    pub icon: Option<String>,
    pub wind_direction: Option<CardinalDirection>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
}

impl From<&WeatherForecastDataRecord> for WeatherConditions {
    fn from(record: &WeatherForecastDataRecord) -> Self {
        WeatherConditions {
            temperature: record.temperature,
            conditions: record.conditions.clone(),
            icon: record.icon.clone(),
            wind_direction: record.wind_cardinal_direction(),
            wind_speed: record.wind_speed,
            wind_gust: record.wind_gust,
        }
    }
}

impl WeatherConditions {
    pub fn glyph(&self) -> Option<&'static str> {
        self.icon.as_deref().map(condition_glyph)
    }

    pub fn temperature_text(&self) -> String {
        match self.temperature {
            Some(t) => format!("{:.1}{}", t, Unit::Celsius.abbreviation()),
            None => "N/A".to_string(),
        }
    }

    pub fn wind_text(&self) -> String {
        let direction = self
            .wind_direction
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "Wind {}: {}, Gusts: {}",
            direction,
            optional_text(self.wind_speed, Unit::KilometersPerHour, 0),
            optional_text(self.wind_gust, Unit::KilometersPerHour, 0)
        )
    }
}

impl fmt::Display for WeatherConditions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.temperature_text())?;
        if let Some(glyph) = self.glyph() {
            write!(f, " {}", glyph)?;
        }
        write!(
            f,
            " {}, {}",
            self.conditions.as_deref().unwrap_or("N/A"),
            self.wind_text()
        )
    }
}

/// Marine fields matched to a departure
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeaState {
    pub wave_height: Option<f64>,
    pub wave_period: Option<f64>,
    pub wave_direction: Option<CardinalDirection>,
    pub swell_wave_height: Option<f64>,
    pub swell_wave_period: Option<f64>,
}

impl From<&MarineForecastDataRecord> for SeaState {
    fn from(record: &MarineForecastDataRecord) -> Self {
        SeaState {
            wave_height: record.wave_height,
            wave_period: record.wave_period,
            wave_direction: record.wave_cardinal_direction(),
            swell_wave_height: record.swell_wave_height,
            swell_wave_period: record.swell_wave_period,
        }
    }
}

impl SeaState {
    pub fn wave_text(&self) -> String {
        match (self.wave_height, self.wave_period) {
            (Some(h), Some(p)) => format!(
                "Waves {:.1} {} @ {:.0} {}",
                h,
                Unit::Meters.abbreviation(),
                p,
                Unit::Seconds.abbreviation()
            ),
            (Some(h), None) => format!("Waves {:.1} {}", h, Unit::Meters.abbreviation()),
            _ => format!("Waves {}", UNAVAILABLE),
        }
    }
}

/// One scheduled sailing merged with whatever forecast matched its hour
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepartureRow {
    pub schedule_time: String,
    pub forecast_key: String,
    pub ferry: FerryLabel,
    pub departs_at: Option<DateTime<Tz>>,
    /// `None` when the schedule time could not be placed on the selected date
    pub temporal_status: Option<TemporalStatus>,
    pub weather: Option<WeatherConditions>,
    pub sea_state: Option<SeaState>,
}

impl DepartureRow {
    pub fn weather_text(&self) -> String {
        self.weather
            .as_ref()
            .map(|w| w.to_string())
            .unwrap_or_else(|| format!("Weather {}", UNAVAILABLE))
    }

    pub fn wave_text(&self) -> String {
        self.sea_state
            .as_ref()
            .map(|s| s.wave_text())
            .unwrap_or_else(|| format!("Waves {}", UNAVAILABLE))
    }
}

impl fmt::Display for DepartureRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.schedule_time, self.ferry)?;
        if let Some(status) = self.temporal_status {
            write!(f, " [{}]", status)?;
        }
        write!(f, ": {} | {}", self.weather_text(), self.wave_text())
    }
}

/// Merges the schedule with both hourly lookups. Rows keep schedule order.
///
/// Each schedule time is bound to `date` in the zone of `now`. Times before
/// `now` are departed, the earliest time after `now` is the next departure
/// (first in schedule order on a tie) and every other row is in the future.
/// A time that cannot be bound still gets forecast matching but no status.
pub fn build_departure_rows(
    entries: &[ScheduleEntry],
    weather: &HourlyLookup<WeatherForecastDataRecord>,
    marine: &HourlyLookup<MarineForecastDataRecord>,
    date: NaiveDate,
    now: &DateTime<Tz>,
) -> Vec<DepartureRow> {
    let tz = now.timezone();

    let instants = entries
        .iter()
        .map(|entry| match parse_clock_time(&entry.time) {
            Ok(time) => bind_to_date(&time, &date, &tz),
            Err(e) => {
                log::warn!("Departure without a usable time: {}", e);
                None
            }
        })
        .collect::<Vec<_>>();

    let next_departure = instants
        .iter()
        .enumerate()
        .filter_map(|(i, instant)| instant.as_ref().filter(|t| **t > *now).map(|t| (i, *t)))
        .min_by_key(|(_, t)| *t)
        .map(|(i, _)| i);

    entries
        .iter()
        .zip(instants)
        .enumerate()
        .map(|(i, (entry, departs_at))| {
            let temporal_status = departs_at.map(|t| {
                if t < *now {
                    TemporalStatus::Departed
                } else if Some(i) == next_departure {
                    TemporalStatus::NextDeparture
                } else {
                    TemporalStatus::Future
                }
            });

            let forecast_key = round_to_nearest_hour(&entry.time);
            let weather = weather.get(&forecast_key).map(WeatherConditions::from);
            let sea_state = marine.get(&forecast_key).map(SeaState::from);

            DepartureRow {
                schedule_time: entry.time.clone(),
                forecast_key,
                ferry: FerryLabel::from_ferry_name(&entry.ferry_name),
                departs_at,
                temporal_status,
                weather,
                sea_state,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::St_Johns;

    use super::*;
    use crate::forecast::build_hourly_lookup;
    use crate::schedule::Dock;

    fn entry(time: &str, ferry: &str) -> ScheduleEntry {
        ScheduleEntry {
            dock: Dock::BellIsland,
            day_label: "Monday to Friday".into(),
            time: time.into(),
            ferry_name: ferry.into(),
        }
    }

    fn hour(time: &str, gust: f64) -> WeatherForecastDataRecord {
        WeatherForecastDataRecord {
            time: time.into(),
            temperature: Some(14.2),
            conditions: Some("Partially cloudy".into()),
            icon: Some("partly-cloudy-day".into()),
            wind_direction: Some(225.0),
            wind_speed: Some(22.0),
            wind_gust: Some(gust),
        }
    }

    fn sea(time: &str, height: f64, period: f64) -> MarineForecastDataRecord {
        MarineForecastDataRecord {
            time: time.into(),
            wave_height: Some(height),
            wave_period: Some(period),
            wave_direction: Some(100.0),
            wind_wave_height: None,
            wind_wave_period: None,
            wind_wave_direction: None,
            swell_wave_height: None,
            swell_wave_period: None,
            swell_wave_direction: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 2).unwrap()
    }

    #[test]
    fn temporal_status_sequence() {
        let entries = vec![entry("08:00 AM", "MV Legionnaire"), entry("10:00 AM", "MV Legionnaire"), entry("02:00 PM", "MV Legionnaire")];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap();
        let rows = build_departure_rows(&entries, &HourlyLookup::default(), &HourlyLookup::default(), date(), &now);

        let statuses = rows.iter().map(|r| r.temporal_status).collect::<Vec<_>>();
        assert_eq!(
            statuses,
            vec![
                Some(TemporalStatus::Departed),
                Some(TemporalStatus::NextDeparture),
                Some(TemporalStatus::Future)
            ]
        );
    }

    #[test]
    fn next_departure_is_the_earliest_future_time_not_the_first_row() {
        let entries = vec![entry("03:00 PM", "MV Flanders"), entry("11:15 AM", "MV Flanders"), entry("07:00 AM", "MV Flanders")];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap();
        let rows = build_departure_rows(&entries, &HourlyLookup::default(), &HourlyLookup::default(), date(), &now);

        assert_eq!(rows[0].temporal_status, Some(TemporalStatus::Future));
        assert_eq!(rows[1].temporal_status, Some(TemporalStatus::NextDeparture));
        assert_eq!(rows[2].temporal_status, Some(TemporalStatus::Departed));
        // Schedule order is kept
        assert_eq!(rows[0].schedule_time, "03:00 PM");
    }

    #[test]
    fn duplicate_earliest_departure_picks_the_first_row() {
        let entries = vec![entry("10:00 AM", "MV Legionnaire"), entry("10:00 AM", "MV Flanders")];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap();
        let rows = build_departure_rows(&entries, &HourlyLookup::default(), &HourlyLookup::default(), date(), &now);

        assert_eq!(rows[0].temporal_status, Some(TemporalStatus::NextDeparture));
        assert_eq!(rows[1].temporal_status, Some(TemporalStatus::Future));
    }

    #[test]
    fn another_day_uses_the_real_current_instant() {
        let entries = vec![entry("06:00 AM", "MV Legionnaire"), entry("08:00 PM", "MV Legionnaire")];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 1, 21, 0, 0).unwrap();
        let rows = build_departure_rows(&entries, &HourlyLookup::default(), &HourlyLookup::default(), date(), &now);

        assert_eq!(rows[0].temporal_status, Some(TemporalStatus::NextDeparture));
        assert_eq!(rows[1].temporal_status, Some(TemporalStatus::Future));
    }

    #[test]
    fn merge_weather_without_waves() {
        let entries = vec![entry("02:10 PM", "MV Legionnaire")];
        let weather = vec![hour("14:00:00", 40.0), hour("15:00:00", 45.0)];
        let marine = vec![sea("2024-07-02T15:00", 1.24, 8.4)];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 6, 0, 0).unwrap();

        let rows = build_departure_rows(
            &entries,
            &build_hourly_lookup(&weather),
            &build_hourly_lookup(&marine),
            date(),
            &now,
        );

        let row = &rows[0];
        assert_eq!(row.forecast_key, "02:00 PM");
        let conditions = row.weather.as_ref().unwrap();
        assert_eq!(conditions.wind_gust, Some(40.0));
        assert_eq!(conditions.wind_direction, Some(CardinalDirection::SouthWest));
        assert_eq!(conditions.wind_text(), "Wind SW: 22 km/h, Gusts: 40 km/h");
        assert!(row.sea_state.is_none());
        assert_eq!(row.wave_text(), "Waves data not available");
    }

    #[test]
    fn merge_weather_and_waves() {
        let entries = vec![entry("02:40 PM", "MV Legionnaire")];
        let weather = vec![hour("15:00:00", 45.0)];
        let marine = vec![sea("2024-07-02T15:00", 1.24, 8.4)];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 6, 0, 0).unwrap();

        let rows = build_departure_rows(
            &entries,
            &build_hourly_lookup(&weather),
            &build_hourly_lookup(&marine),
            date(),
            &now,
        );

        assert_eq!(rows[0].wave_text(), "Waves 1.2 m @ 8 s");
        assert_eq!(
            rows[0].to_string(),
            "02:40 PM (Legionnaire) [next departure]: 14.2°C ⛅ Partially cloudy, Wind SW: 22 km/h, Gusts: 45 km/h | Waves 1.2 m @ 8 s"
        );
    }

    #[test]
    fn unparseable_time_keeps_the_row() {
        let entries = vec![entry("TBA", "MV Flanders"), entry("10:00 AM", "MV Flanders")];
        let weather = vec![hour("10:00:00", 20.0)];
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap();
        let rows = build_departure_rows(&entries, &build_hourly_lookup(&weather), &HourlyLookup::default(), date(), &now);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].forecast_key, "TBA");
        assert!(rows[0].temporal_status.is_none());
        assert!(rows[0].weather.is_none());
        assert_eq!(rows[0].weather_text(), "Weather data not available");
        assert_eq!(rows[1].temporal_status, Some(TemporalStatus::NextDeparture));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let entries = vec![entry("06:50 AM", "MV Legionnaire"), entry("12:45 PM", "MV Legionnaire"), entry("11:45 PM", "MV Flanders")];
        let weather = vec![hour("07:00:00", 20.0), hour("13:00:00", 50.0), hour("00:00:00", 10.0)];
        let marine = vec![sea("2024-07-02T13:00", 0.8, 6.0)];
        let weather = build_hourly_lookup(&weather);
        let marine = build_hourly_lookup(&marine);
        let now = St_Johns.with_ymd_and_hms(2024, 7, 2, 12, 0, 0).unwrap();

        let first = build_departure_rows(&entries, &weather, &marine, date(), &now);
        let second = build_departure_rows(&entries, &weather, &marine, date(), &now);
        assert_eq!(first, second);
        // 11:45 PM rounds onto the midnight sample
        assert_eq!(first[2].forecast_key, "12:00 AM");
        assert!(first[2].weather.is_some());
    }

    #[test]
    fn ferry_labels() {
        let label = FerryLabel::from_ferry_name("MV Legionnaire");
        assert_eq!(label.name, "Legionnaire");
        assert!(!label.maintenance);

        let label = FerryLabel::from_ferry_name("M.V. Beaumont Hamel (Maintenance)");
        assert_eq!(label.name, "Beaumont Hamel");
        assert!(label.maintenance);
        assert_eq!(label.to_string(), "Beaumont Hamel [maintenance]");

        let label = FerryLabel::from_ferry_name("Maintenance");
        assert_eq!(label.name, "Maintenance");
        assert!(label.maintenance);

        let label = FerryLabel::from_ferry_name("Flanders");
        assert_eq!(label.to_string(), "Flanders");
    }

    #[test]
    fn label_patterns() {
        assert!(Regex::new(VESSEL_PREFIX_PATTERN).is_ok());
        assert!(Regex::new(MAINTENANCE_TAG_PATTERN).is_ok());

        assert_eq!(vessel_prefix().replace("MV Flanders", ""), "Flanders");
        assert_eq!(vessel_prefix().replace("m.v. Flanders", ""), "Flanders");
        assert_eq!(vessel_prefix().replace("Marvel", ""), "Marvel");
        assert!(maintenance_tag().is_match("Legionnaire [maintenance]"));
        assert!(!maintenance_tag().is_match("Legionnaire"));

        let label = FerryLabel::from_ferry_name("  MV  Legionnaire - Maintenance ");
        assert_eq!(label.name, "Legionnaire");
        assert!(label.maintenance);
    }

    #[test]
    fn condition_glyphs() {
        assert_eq!(condition_glyph("rain"), "🌧️");
        assert_eq!(condition_glyph("clear-day"), "☀️");
        assert_eq!(condition_glyph("hail-storm"), "🌡️");
    }
}
