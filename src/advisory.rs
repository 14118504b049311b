use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::data::marine_forecast_data_record::MarineForecastDataRecord;
use crate::data::weather_forecast_data_record::WeatherForecastDataRecord;
use crate::forecast::HourlyRecord;
use crate::tools::clock::format_hour_key;
use crate::tools::vector::argmax_first;

/// First and last local hour (inclusive) considered when looking for the peak of the day
pub const DAYTIME_START_HOUR: u32 = 5;
pub const DAYTIME_END_HOUR: u32 = 23;

pub fn in_daytime_window(time: &NaiveTime) -> bool {
    (DAYTIME_START_HOUR..=DAYTIME_END_HOUR).contains(&time.hour())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindAdvisoryLevel {
    None,
    Moderate,
    Strong,
    VeryStrong,
}

impl WindAdvisoryLevel {
    /// Bands are inclusive at the lower bound, gusts in km/h
    pub fn from_gust(gust: f64) -> WindAdvisoryLevel {
        if gust >= 80.0 {
            WindAdvisoryLevel::VeryStrong
        } else if gust >= 50.0 {
            WindAdvisoryLevel::Strong
        } else if gust >= 30.0 {
            WindAdvisoryLevel::Moderate
        } else {
            WindAdvisoryLevel::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindAdvisoryLevel::None => "none",
            WindAdvisoryLevel::Moderate => "moderate",
            WindAdvisoryLevel::Strong => "strong",
            WindAdvisoryLevel::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for WindAdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaveAdvisoryLevel {
    Normal,
    Caution,
    Rough,
    Severe,
}

impl WaveAdvisoryLevel {
    /// Bands are inclusive at the lower bound, heights in meters
    pub fn from_wave_height(height: f64) -> WaveAdvisoryLevel {
        if height >= 2.0 {
            WaveAdvisoryLevel::Severe
        } else if height >= 1.5 {
            WaveAdvisoryLevel::Rough
        } else if height >= 1.0 {
            WaveAdvisoryLevel::Caution
        } else {
            WaveAdvisoryLevel::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaveAdvisoryLevel::Normal => "normal",
            WaveAdvisoryLevel::Caution => "caution",
            WaveAdvisoryLevel::Rough => "rough",
            WaveAdvisoryLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for WaveAdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Largest value seen in the daytime window and the hour it occurs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub value: f64,
    pub time: NaiveTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advisory<L> {
    pub level: L,
    /// `None` when no record falls inside the daytime window
    pub peak: Option<Peak>,
}

impl<L> Advisory<L> {
    pub fn peak_time_label(&self) -> Option<String> {
        self.peak.map(|p| format_hour_key(&p.time))
    }
}

fn classify_peak<R, V, C, L>(records: &[R], value_of: V, classify: C, calm: L) -> Advisory<L>
where
    R: HourlyRecord,
    V: Fn(&R) -> Option<f64>,
    C: Fn(f64) -> L,
{
    let window = records
        .iter()
        .filter_map(|r| r.time_of_day().ok().map(|t| (t, value_of(r).unwrap_or(0.0))))
        .filter(|(t, _)| in_daytime_window(t))
        .collect::<Vec<_>>();

    let values = window.iter().map(|(_, v)| *v).collect::<Vec<_>>();
    match argmax_first(&values) {
        Some(i) => {
            let (time, value) = window[i];
            Advisory {
                level: classify(value),
                peak: Some(Peak { value, time }),
            }
        }
        None => Advisory {
            level: calm,
            peak: None,
        },
    }
}

/// Classifies the strongest gust between 05:00 and 23:59 local. Missing gusts count as calm.
pub fn classify_wind_advisory(records: &[WeatherForecastDataRecord]) -> Advisory<WindAdvisoryLevel> {
    classify_peak(
        records,
        |r| r.wind_gust,
        WindAdvisoryLevel::from_gust,
        WindAdvisoryLevel::None,
    )
}

/// Classifies the highest significant wave height in the same daytime window
pub fn classify_wave_advisory(records: &[MarineForecastDataRecord]) -> Advisory<WaveAdvisoryLevel> {
    classify_peak(
        records,
        |r| r.wave_height,
        WaveAdvisoryLevel::from_wave_height,
        WaveAdvisoryLevel::Normal,
    )
}

impl Advisory<WindAdvisoryLevel> {
    pub fn is_warning(&self) -> bool {
        self.level == WindAdvisoryLevel::VeryStrong
    }

    /// Banner text for the selected day, `None` when gusts stay below the moderate band
    pub fn message(&self, day_label: &str) -> Option<String> {
        let peak = match self.peak {
            Some(peak) => peak,
            None => {
                return Some(format!(
                    "{day_label}: No significant wind data available between 5 AM and 11 PM."
                ))
            }
        };

        let headline = match self.level {
            WindAdvisoryLevel::VeryStrong => "💨⚠️ WARNING: Very strong winds forecast.",
            WindAdvisoryLevel::Strong => "💨 Strong winds forecast.",
            WindAdvisoryLevel::Moderate => "Moderate winds forecast.",
            WindAdvisoryLevel::None => return None,
        };

        Some(format!(
            "{day_label}: {headline} Gusts: {} km/h at {}.",
            peak.value,
            format_hour_key(&peak.time)
        ))
    }
}

impl Advisory<WaveAdvisoryLevel> {
    pub fn is_warning(&self) -> bool {
        self.level == WaveAdvisoryLevel::Severe
    }

    pub fn message(&self, day_label: &str) -> Option<String> {
        let peak = self.peak?;
        let headline = match self.level {
            WaveAdvisoryLevel::Severe => "🌊⚠️ WARNING: Severe seas forecast.",
            WaveAdvisoryLevel::Rough => "🌊 Rough seas forecast.",
            WaveAdvisoryLevel::Caution => "Choppy seas forecast, use caution.",
            WaveAdvisoryLevel::Normal => return None,
        };

        Some(format!(
            "{day_label}: {headline} Waves: {:.1} m at {}.",
            peak.value,
            format_hour_key(&peak.time)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(time: &str, gust: Option<f64>) -> WeatherForecastDataRecord {
        WeatherForecastDataRecord {
            time: time.into(),
            temperature: None,
            conditions: None,
            icon: None,
            wind_direction: None,
            wind_speed: None,
            wind_gust: gust,
        }
    }

    fn sea(time: &str, height: Option<f64>) -> MarineForecastDataRecord {
        MarineForecastDataRecord {
            time: time.into(),
            wave_height: height,
            wave_period: None,
            wave_direction: None,
            wind_wave_height: None,
            wind_wave_period: None,
            wind_wave_direction: None,
            swell_wave_height: None,
            swell_wave_period: None,
            swell_wave_direction: None,
        }
    }

    #[test]
    fn very_strong_peak() {
        let records = vec![
            hour("06:00:00", Some(20.0)),
            hour("09:00:00", Some(35.0)),
            hour("13:00:00", Some(55.0)),
            hour("17:00:00", Some(85.0)),
        ];
        let advisory = classify_wind_advisory(&records);
        assert_eq!(advisory.level, WindAdvisoryLevel::VeryStrong);
        let peak = advisory.peak.unwrap();
        assert!((peak.value - 85.0).abs() < 0.0001);
        assert_eq!(advisory.peak_time_label().as_deref(), Some("05:00 PM"));
        assert!(advisory.is_warning());
    }

    #[test]
    fn calm_day() {
        let records = vec![hour("06:00:00", Some(12.0)), hour("18:00:00", Some(29.9))];
        let advisory = classify_wind_advisory(&records);
        assert_eq!(advisory.level, WindAdvisoryLevel::None);
        assert!(advisory.peak.is_some());
        assert!(advisory.message("Tuesday, Jul 02").is_none());
    }

    #[test]
    fn empty_daytime_window() {
        let advisory = classify_wind_advisory(&[]);
        assert_eq!(advisory.level, WindAdvisoryLevel::None);
        assert!(advisory.peak.is_none());

        // Only overnight hours
        let records = vec![hour("01:00:00", Some(95.0)), hour("04:00:00", Some(90.0))];
        let advisory = classify_wind_advisory(&records);
        assert_eq!(advisory.level, WindAdvisoryLevel::None);
        assert!(advisory.peak.is_none());
        assert_eq!(
            advisory.message("Monday, Jul 01").as_deref(),
            Some("Monday, Jul 01: No significant wind data available between 5 AM and 11 PM.")
        );
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(WindAdvisoryLevel::from_gust(29.99), WindAdvisoryLevel::None);
        assert_eq!(WindAdvisoryLevel::from_gust(30.0), WindAdvisoryLevel::Moderate);
        assert_eq!(WindAdvisoryLevel::from_gust(49.9), WindAdvisoryLevel::Moderate);
        assert_eq!(WindAdvisoryLevel::from_gust(50.0), WindAdvisoryLevel::Strong);
        assert_eq!(WindAdvisoryLevel::from_gust(79.9), WindAdvisoryLevel::Strong);
        assert_eq!(WindAdvisoryLevel::from_gust(80.0), WindAdvisoryLevel::VeryStrong);

        assert_eq!(WaveAdvisoryLevel::from_wave_height(0.99), WaveAdvisoryLevel::Normal);
        assert_eq!(WaveAdvisoryLevel::from_wave_height(1.0), WaveAdvisoryLevel::Caution);
        assert_eq!(WaveAdvisoryLevel::from_wave_height(1.5), WaveAdvisoryLevel::Rough);
        assert_eq!(WaveAdvisoryLevel::from_wave_height(2.0), WaveAdvisoryLevel::Severe);
    }

    #[test]
    fn ties_and_missing_gusts() {
        let records = vec![
            hour("05:00:00", None),
            hour("08:00:00", Some(52.0)),
            hour("11:00:00", None),
            hour("15:00:00", Some(52.0)),
            hour("23:00:00", Some(10.0)),
        ];
        let advisory = classify_wind_advisory(&records);
        assert_eq!(advisory.level, WindAdvisoryLevel::Strong);
        assert_eq!(advisory.peak_time_label().as_deref(), Some("08:00 AM"));
        assert_eq!(
            advisory.message("Friday, Jul 05").as_deref(),
            Some("Friday, Jul 05: 💨 Strong winds forecast. Gusts: 52 km/h at 08:00 AM.")
        );

        // Every gust missing still reports the first daytime hour at zero
        let records = vec![hour("04:00:00", None), hour("05:00:00", None), hour("06:00:00", None)];
        let advisory = classify_wind_advisory(&records);
        assert_eq!(advisory.level, WindAdvisoryLevel::None);
        assert_eq!(advisory.peak_time_label().as_deref(), Some("05:00 AM"));
    }

    #[test]
    fn late_evening_is_inside_the_window() {
        let records = vec![hour("22:00:00", Some(31.0)), hour("23:00:00", Some(45.0))];
        let advisory = classify_wind_advisory(&records);
        assert_eq!(advisory.level, WindAdvisoryLevel::Moderate);
        assert_eq!(advisory.peak_time_label().as_deref(), Some("11:00 PM"));
    }

    #[test]
    fn wave_advisory() {
        let records = vec![
            sea("2024-07-02T03:00", Some(2.6)),
            sea("2024-07-02T07:00", Some(1.2)),
            sea("2024-07-02T12:00", Some(1.7)),
            sea("2024-07-02T16:00", None),
        ];
        let advisory = classify_wave_advisory(&records);
        assert_eq!(advisory.level, WaveAdvisoryLevel::Rough);
        assert_eq!(advisory.peak_time_label().as_deref(), Some("12:00 PM"));
        assert!(!advisory.is_warning());
        assert_eq!(
            advisory.message("Tuesday, Jul 02").as_deref(),
            Some("Tuesday, Jul 02: 🌊 Rough seas forecast. Waves: 1.7 m at 12:00 PM.")
        );

        let advisory = classify_wave_advisory(&[]);
        assert_eq!(advisory.level, WaveAdvisoryLevel::Normal);
        assert!(advisory.message("Tuesday, Jul 02").is_none());
    }
}
