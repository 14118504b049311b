pub mod marine_forecast_data_record;
pub mod parseable_data_record;
pub mod weather_forecast_data_record;
