use std::collections::HashMap;

use chrono::NaiveTime;

use crate::data::parseable_data_record::DataRecordParsingError;
use crate::tools::clock::format_hour_key;

/// A provider record that belongs to one local wall clock hour
pub trait HourlyRecord {
    fn time_of_day(&self) -> Result<NaiveTime, DataRecordParsingError>;

    fn hour_key(&self) -> Result<String, DataRecordParsingError> {
        self.time_of_day().map(|t| format_hour_key(&t))
    }
}

/// Forecast samples indexed by their "hh:mm AM/PM" key. Built fresh for every
/// dock and date selection.
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyLookup<T> {
    samples: HashMap<String, T>,
}

impl<T> Default for HourlyLookup<T> {
    fn default() -> Self {
        HourlyLookup {
            samples: HashMap::new(),
        }
    }
}

impl<T> HourlyLookup<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.samples.get(key)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.samples.keys()
    }
}

/// Indexes records by hour key. A record whose timestamp does not parse is
/// skipped on its own. When two records share a key the first one is kept.
pub fn build_hourly_lookup<'a, T, I>(records: I) -> HourlyLookup<T>
where
    T: HourlyRecord + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut samples = HashMap::new();
    let mut skipped = 0;

    for record in records {
        match record.hour_key() {
            Ok(key) => {
                samples.entry(key).or_insert_with(|| record.clone());
            }
            Err(e) => {
                log::warn!("Skipping forecast record: {}", e);
                skipped += 1;
            }
        }
    }

    log::debug!("Built hourly lookup with {} samples, {} skipped", samples.len(), skipped);
    HourlyLookup { samples }
}
