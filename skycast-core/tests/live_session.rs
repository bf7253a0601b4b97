//! End-to-end tests driving a live-mode session through the dispatcher.
//!
//! All three upstream services are served by one wiremock server.

use skycast_core::{
    Config, DataMode, Dispatcher, Event, Session, UnitSystem, WeatherError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body(current: f64, highs: [f64; 7]) -> serde_json::Value {
    serde_json::json!({
        "latitude": 45.42,
        "longitude": -75.69,
        "current_weather": {"temperature": current, "windspeed": 7.2, "weathercode": 0},
        "daily": {
            "time": ["2026-10-17", "2026-10-18", "2026-10-19", "2026-10-20",
                     "2026-10-21", "2026-10-22", "2026-10-23"],
            "weathercode": [0, 2, 3, 61, 61, 71, 95],
            "temperature_2m_max": highs,
            "temperature_2m_min": [1, 2, 3, 4, 5, 6, 7],
            "precipitation_probability_mean": [0, 10, 20, 70, 65, 40, 90],
            "precipitation_sum": [0, 0, 0.4, 8.1, 5.0, 2.2, 14.9],
            "wind_speed_10m_max": [12, 14, 9, 22, 25, 18, 30],
            "wind_gusts_10m_max": [25, 28, 20, 44, 51, 36, 62],
            "relative_humidity_2m_mean": [61, 64, 70, 88, 85, 79, 90],
            "apparent_temperature_max": [9, 10, 8, 6, 5, 1, 4]
        }
    })
}

async fn live_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0.1/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": false,
            "data": [
                {"country": "Belgium", "cities": ["Ghent"]},
                {"country": "Canada", "cities": ["Ottawa", "Halifax"]}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Ottawa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"name": "Ottawa", "latitude": 45.41117, "longitude": -75.69812}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Nowhereville"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "45.41117"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(8.5, [10.0, 11.0, 9.0, 7.0, 6.0, 2.0, 5.0])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(47.3, [50.0, 51.8, 48.2, 44.6, 42.8, 35.6, 41.0])),
        )
        .mount(&server)
        .await;

    server
}

fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.default_mode = DataMode::Live;
    cfg.endpoints.forecast = format!("{}/v1/forecast", server.uri());
    cfg.endpoints.geocoding = format!("{}/v1/search", server.uri());
    cfg.endpoints.countries = format!("{}/api/v0.1/countries", server.uri());
    cfg
}

#[tokio::test]
async fn live_start_resolves_first_canadian_city() {
    let server = live_server().await;
    let cfg = config_for(&server);
    let dispatcher = Dispatcher::from_config(&cfg);

    let session = dispatcher.run(Session::from_config(&cfg), Event::Start).await;

    assert_eq!(session.city.as_deref(), Some("Ottawa"));
    assert_eq!(session.countries.len(), 2);
    assert_eq!(session.last_error, None);

    let report = session.report.expect("live report");
    assert_eq!(report.current.temperature, 8.5);
    assert_eq!(report.daily.temperature_2m_max[0], Some(10.0));
}

#[tokio::test]
async fn unit_toggle_requests_fahrenheit_upstream() {
    let server = live_server().await;
    let cfg = config_for(&server);
    let dispatcher = Dispatcher::from_config(&cfg);

    let session = dispatcher.run(Session::from_config(&cfg), Event::Start).await;
    let session = dispatcher.run(session, Event::ToggleUnit).await;

    assert_eq!(session.unit, UnitSystem::Fahrenheit);
    let report = session.report.expect("fahrenheit report");
    assert_eq!(report.current.temperature, 47.3);
    assert_eq!(report.daily.temperature_2m_max[1], Some(51.8));
}

#[tokio::test]
async fn unknown_city_leaves_report_untouched() {
    let server = live_server().await;
    let cfg = config_for(&server);
    let dispatcher = Dispatcher::from_config(&cfg);

    let session = dispatcher.run(Session::from_config(&cfg), Event::Start).await;
    let before = session.report.clone();
    assert!(before.is_some());

    let session = dispatcher
        .run(session, Event::SelectCity("Nowhereville".into()))
        .await;

    assert_eq!(session.report, before);
    assert_eq!(
        session.last_error,
        Some(WeatherError::NoMatchFound("Nowhereville".into()))
    );
}

#[tokio::test]
async fn configured_city_is_selected_first() {
    let server = live_server().await;
    let mut cfg = config_for(&server);
    cfg.set_default_city("Nowhereville");
    let dispatcher = Dispatcher::from_config(&cfg);

    let session = dispatcher.run(Session::from_config(&cfg), Event::Start).await;

    assert_eq!(session.city.as_deref(), Some("Nowhereville"));
    assert_eq!(session.report, None);
    assert!(matches!(session.last_error, Some(WeatherError::NoMatchFound(_))));
}

#[tokio::test]
async fn configured_city_survives_country_list_outage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0.1/countries"))
        .respond_with(ResponseTemplate::new(500).set_body_string("list unavailable"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Ottawa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"name": "Ottawa", "latitude": 45.41117, "longitude": -75.69812}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(8.5, [10.0, 11.0, 9.0, 7.0, 6.0, 2.0, 5.0])),
        )
        .mount(&server)
        .await;

    let mut cfg = config_for(&server);
    cfg.set_default_city("Ottawa");
    let dispatcher = Dispatcher::from_config(&cfg);

    let session = dispatcher.run(Session::from_config(&cfg), Event::Start).await;

    assert_eq!(session.city.as_deref(), Some("Ottawa"));
    assert!(session.countries.is_empty());
    assert_eq!(session.last_error, None);
    assert_eq!(session.report.expect("report despite list outage").current.temperature, 8.5);
}
