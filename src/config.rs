//! Runtime configuration.
//!
//! Settings come from an optional TOML file (`ferrycast.toml` in the working
//! directory unless a path is given) with the forecast api key overridable from
//! the environment:
//!
//! ```toml
//! timezone = "America/St_Johns"
//!
//! [providers]
//! visual_crossing_api_key = "..."
//!
//! [[schedules]]
//! name = "Winter"
//! path = "schedules/winter.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::client::{OPEN_METEO_MARINE_URL, VISUAL_CROSSING_TIMELINE_URL};
use crate::error::FerryError;

pub const DEFAULT_CONFIG_PATH: &str = "ferrycast.toml";
pub const DEFAULT_TIMEZONE: &str = "America/St_Johns";
pub const DEFAULT_SCHEDULE_NAME: &str = "Default";
pub const DEFAULT_SCHEDULE_PATH: &str = "ferry_schedule.csv";
pub const API_KEY_ENV: &str = "FERRYCAST_VISUAL_CROSSING_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub providers: ProviderSettings,
    #[serde(default)]
    pub schedules: Vec<ScheduleVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub visual_crossing_api_key: Option<String>,
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    #[serde(default = "default_marine_base_url")]
    pub marine_base_url: String,
}

/// A named schedule table, e.g. a seasonal timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleVariant {
    pub name: String,
    pub path: PathBuf,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_weather_base_url() -> String {
    VISUAL_CROSSING_TIMELINE_URL.to_string()
}

fn default_marine_base_url() -> String {
    OPEN_METEO_MARINE_URL.to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            visual_crossing_api_key: None,
            weather_base_url: default_weather_base_url(),
            marine_base_url: default_marine_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: default_timezone(),
            providers: ProviderSettings::default(),
            schedules: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, FerryError> {
        toml::from_str(content).map_err(|e| {
            FerryError::ConfigurationInvalid(format!("Failed to parse config file: {}", e))
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FerryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            FerryError::ConfigurationInvalid(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Loads the given file, or the default file when it exists, or built in
    /// defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, FerryError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => {
                log::debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                Config::default()
            }
        };

        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.providers.visual_crossing_api_key = Some(key);
        }
        self
    }

    pub fn api_key(&self) -> Result<&str, FerryError> {
        self.providers
            .visual_crossing_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                FerryError::ConfigurationMissing(format!(
                    "no Visual Crossing api key, set {} or providers.visual_crossing_api_key",
                    API_KEY_ENV
                ))
            })
    }

    pub fn timezone(&self) -> Result<Tz, FerryError> {
        self.timezone.parse::<Tz>().map_err(|e| {
            FerryError::ConfigurationInvalid(format!("unknown timezone {}: {}", self.timezone, e))
        })
    }

    pub fn schedule_variants(&self) -> Vec<ScheduleVariant> {
        if self.schedules.is_empty() {
            return vec![ScheduleVariant {
                name: DEFAULT_SCHEDULE_NAME.to_string(),
                path: PathBuf::from(DEFAULT_SCHEDULE_PATH),
            }];
        }
        self.schedules.clone()
    }

    /// The named variant, or the first configured one when no name is given
    pub fn schedule_variant(&self, name: Option<&str>) -> Result<ScheduleVariant, FerryError> {
        let variants = self.schedule_variants();
        let variant = match name {
            Some(name) => variants.into_iter().find(|v| v.name.eq_ignore_ascii_case(name)),
            None => variants.into_iter().next(),
        };

        variant.ok_or_else(|| {
            FerryError::ConfigurationInvalid(format!(
                "no schedule named {}",
                name.unwrap_or_default()
            ))
        })
    }
}
