use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{
    error::Result,
    http,
    model::{Coordinates, UnitSystem, WeatherReport},
};

use super::WeatherProvider;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Daily metrics requested from the forecast service, in the names the model uses.
const DAILY_METRICS: &str = "weathercode,temperature_2m_max,temperature_2m_min,\
precipitation_probability_mean,precipitation_sum,wind_speed_10m_max,wind_gusts_10m_max,\
relative_humidity_2m_mean,apparent_temperature_max";

/// Live provider backed by the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    forecast_url: String,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_URL)
    }
}

impl OpenMeteoProvider {
    pub fn new(forecast_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            forecast_url: forecast_url.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self), level = "debug")]
    async fn get_report(
        &self,
        coordinates: Coordinates,
        unit: UnitSystem,
    ) -> Result<WeatherReport> {
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("daily", DAILY_METRICS),
                ("current_weather", "true"),
                ("temperature_unit", unit.as_query()),
                ("wind_speed_unit", "kmh"),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let body = http::success_body(res, "Forecast").await?;

        let report: WeatherReport = serde_json::from_str(&body)?;
        report.validate()?;

        Ok(report)
    }
}
