use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::Client;

use crate::config::Config;
use crate::data::marine_forecast_data_record::MarineForecastDataRecordCollection;
use crate::data::weather_forecast_data_record::WeatherForecastDataRecordCollection;
use crate::error::FerryError;
use crate::location::Location;

pub const VISUAL_CROSSING_TIMELINE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";
pub const OPEN_METEO_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

const WEATHER_PROVIDER: &str = "weather";
const MARINE_PROVIDER: &str = "marine";

const MARINE_HOURLY_VARIABLES: &str = "wave_height,wave_direction,wave_period,\
wind_wave_height,wind_wave_direction,wind_wave_period,\
swell_wave_height,swell_wave_direction,swell_wave_period";

pub fn create_timeline_url(base_url: &str, location: &Location, date: &NaiveDate, api_key: &str) -> String {
    format!(
        "{base_url}/{coordinates}/{date}?unitGroup=metric&key={api_key}&include=hours",
        coordinates = location.coordinate_query(),
        date = date.format("%Y-%m-%d"),
    )
}

pub fn create_marine_url(base_url: &str, location: &Location, date: &NaiveDate, timezone: &Tz) -> String {
    format!(
        "{base_url}?latitude={lat}&longitude={lon}&hourly={MARINE_HOURLY_VARIABLES}&timezone={tz}&start_date={date}&end_date={date}",
        lat = location.latitude,
        lon = location.longitude,
        tz = timezone.name(),
        date = date.format("%Y-%m-%d"),
    )
}

/// Fetches one day of hourly forecasts from both providers. No caching and no
/// retries: every call goes upstream.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_key: String,
    weather_base_url: String,
    marine_base_url: String,
    timezone: Tz,
}

impl ForecastClient {
    pub fn new(config: &Config) -> Result<Self, FerryError> {
        Ok(ForecastClient {
            client: Client::new(),
            api_key: config.api_key()?.to_string(),
            weather_base_url: config.providers.weather_base_url.clone(),
            marine_base_url: config.providers.marine_base_url.clone(),
            timezone: config.timezone()?,
        })
    }

    async fn fetch_text(&self, provider: &'static str, url: &str) -> Result<String, FerryError> {
        let failure = |reason: String| FerryError::UpstreamFetchFailure { provider, reason };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failure(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| failure(e.without_url().to_string()))
    }

    pub async fn fetch_weather(
        &self,
        location: &Location,
        date: &NaiveDate,
    ) -> Result<WeatherForecastDataRecordCollection, FerryError> {
        log::info!("Fetching weather forecast for {} on {}", location.name, date);
        let url = create_timeline_url(&self.weather_base_url, location, date, &self.api_key);
        let body = self.fetch_text(WEATHER_PROVIDER, &url).await?;

        WeatherForecastDataRecordCollection::from_json(&body).map_err(|e| FerryError::UpstreamFetchFailure {
            provider: WEATHER_PROVIDER,
            reason: format!("unreadable response: {}", e),
        })
    }

    pub async fn fetch_marine(
        &self,
        location: &Location,
        date: &NaiveDate,
    ) -> Result<MarineForecastDataRecordCollection, FerryError> {
        log::info!("Fetching marine forecast for {} on {}", location.name, date);
        let url = create_marine_url(&self.marine_base_url, location, date, &self.timezone);
        let body = self.fetch_text(MARINE_PROVIDER, &url).await?;

        MarineForecastDataRecordCollection::from_json(&body).map_err(|e| FerryError::UpstreamFetchFailure {
            provider: MARINE_PROVIDER,
            reason: format!("unreadable response: {}", e),
        })
    }

    /// Runs both fetches at once and waits for both outcomes
    pub async fn fetch_forecasts(
        &self,
        location: &Location,
        date: &NaiveDate,
    ) -> (
        Result<WeatherForecastDataRecordCollection, FerryError>,
        Result<MarineForecastDataRecordCollection, FerryError>,
    ) {
        tokio::join!(self.fetch_weather(location, date), self.fetch_marine(location, date))
    }
}
