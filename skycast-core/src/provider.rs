use crate::{
    Config,
    error::Result,
    model::{Coordinates, DataMode, UnitSystem, WeatherReport},
    provider::{mock::MockProvider, open_meteo::OpenMeteoProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod mock;
pub mod open_meteo;

/// Source of normalized weather reports. Callers never branch on which one they hold.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_report(
        &self,
        coordinates: Coordinates,
        unit: UnitSystem,
    ) -> Result<WeatherReport>;
}

/// Construct the provider for a data source, using endpoints from config.
pub fn provider_for(mode: DataMode, config: &Config) -> Box<dyn WeatherProvider> {
    match mode {
        DataMode::Mock => Box::new(MockProvider::default()),
        DataMode::Live => Box::new(OpenMeteoProvider::new(config.endpoints.forecast.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::MockCity;
    use crate::model::FORECAST_DAYS;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn mock_mode_provider_needs_no_network() {
        let mut cfg = Config::default();
        cfg.endpoints.forecast = "http://127.0.0.1:9/unreachable".into();

        let provider = provider_for(DataMode::Mock, &cfg);
        let report = provider
            .get_report(MockCity::Edmonton.coordinates(), UnitSystem::Celsius)
            .await
            .expect("mock mode cannot fail");

        assert_eq!(report.daily.time.len(), FORECAST_DAYS);
        assert_eq!(report.current.temperature, 10.0);
    }

    #[tokio::test]
    async fn live_mode_provider_uses_configured_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(crate::model::tests::sample_body(UnitSystem::Celsius)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut cfg = Config::default();
        cfg.endpoints.forecast = mock_server.uri();

        let provider = provider_for(DataMode::Live, &cfg);
        let report = provider
            .get_report(MockCity::Calgary.coordinates(), UnitSystem::Celsius)
            .await
            .unwrap();

        assert_eq!(report.current.temperature, 12.4);
    }
}
