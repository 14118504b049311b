use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::data::parseable_data_record::DataRecordParsingError;

/// Twelve hour wall clock format shared by the schedule and every hourly lookup key.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// Parses schedule style clock text such as "02:10 PM"
pub fn parse_clock_time(time: &str) -> Result<NaiveTime, DataRecordParsingError> {
    NaiveTime::parse_from_str(time, CLOCK_FORMAT)
        .map_err(|_| DataRecordParsingError::InvalidTime(time.to_string()))
}

/// Formats a wall clock time as a lookup key, zero padded with upper case AM/PM
pub fn format_hour_key(time: &NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Rounds to the closest whole hour. Half past and later rounds up, wrapping past midnight.
pub fn round_time_to_hour(time: &NaiveTime) -> NaiveTime {
    let time = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(*time);
    let minute = time.minute() as i64;
    if minute >= 30 {
        time + Duration::minutes(60 - minute)
    } else {
        time - Duration::minutes(minute)
    }
}

/// Rounds clock text to the nearest hour key. Text that is not a valid clock
/// time is handed back untouched.
pub fn round_to_nearest_hour(time: &str) -> String {
    match parse_clock_time(time) {
        Ok(parsed) => format_hour_key(&round_time_to_hour(&parsed)),
        Err(_) => time.to_string(),
    }
}

/// Binds a wall clock time to a calendar date in the given zone. Returns `None`
/// for a local time skipped by a daylight saving transition; an ambiguous time
/// resolves to its earlier instant.
pub fn bind_to_date(time: &NaiveTime, date: &NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(*time)).earliest()
}
