//! Turn a city selection into coordinates.

use std::{fmt, str::FromStr};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::{Result, WeatherError},
    http,
    model::{Coordinates, DataMode},
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Country every mock city belongs to.
pub const MOCK_COUNTRY: &str = "Canada";

/// Cities available in mock mode, with their fixed placeholder readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MockCity {
    Calgary,
    Edmonton,
    Toronto,
    Vancouver,
}

impl MockCity {
    pub const fn all() -> &'static [MockCity] {
        &[
            MockCity::Calgary,
            MockCity::Edmonton,
            MockCity::Toronto,
            MockCity::Vancouver,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MockCity::Calgary => "Calgary",
            MockCity::Edmonton => "Edmonton",
            MockCity::Toronto => "Toronto",
            MockCity::Vancouver => "Vancouver",
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        let (latitude, longitude) = match self {
            MockCity::Calgary => (51.0447, -114.0719),
            MockCity::Edmonton => (53.5461, -113.4938),
            MockCity::Toronto => (43.65107, -79.347015),
            MockCity::Vancouver => (49.2827, -123.1207),
        };
        Coordinates { latitude, longitude }
    }

    /// Current temperature and the centre of the generated daily range.
    pub fn base_temperature(&self) -> f64 {
        match self {
            MockCity::Calgary => 18.0,
            MockCity::Edmonton => 10.0,
            MockCity::Toronto => 22.0,
            MockCity::Vancouver => 16.0,
        }
    }

    /// Current wind speed in km/h.
    pub fn wind_speed(&self) -> f64 {
        match self {
            MockCity::Calgary => 12.0,
            MockCity::Edmonton => 15.0,
            MockCity::Toronto => 9.0,
            MockCity::Vancouver => 11.0,
        }
    }

    /// The table entry closest to `coordinates`.
    pub fn nearest(coordinates: &Coordinates) -> MockCity {
        Self::all()
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = a.coordinates().distance_sq(coordinates);
                let db = b.coordinates().distance_sq(coordinates);
                da.total_cmp(&db)
            })
            .unwrap_or(MockCity::Calgary)
    }
}

impl fmt::Display for MockCity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MockCity {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|city| city.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown mock city '{value}'. Supported cities: Calgary, Edmonton, Toronto, Vancouver."
                )
            })
    }
}

/// What the user picked, interpreted for the active data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Mock(MockCity),
    Live(String),
}

impl Selection {
    /// Interpret a city name for `mode`. A name outside the mock table is reported as
    /// `NoMatchFound` rather than aborting the session.
    pub fn for_mode(mode: DataMode, city: &str) -> Result<Self> {
        match mode {
            DataMode::Mock => city
                .parse::<MockCity>()
                .map(Selection::Mock)
                .map_err(|_| WeatherError::NoMatchFound(city.to_string())),
            DataMode::Live => Ok(Selection::Live(city.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    // Absent when nothing matched.
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    http: Client,
    geocoding_url: String,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(DEFAULT_GEOCODING_URL)
    }
}

impl LocationResolver {
    pub fn new(geocoding_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
        }
    }

    pub async fn resolve(&self, selection: &Selection) -> Result<Coordinates> {
        match selection {
            Selection::Mock(city) => Ok(city.coordinates()),
            Selection::Live(name) => self.geocode(name).await,
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn geocode(&self, city: &str) -> Result<Coordinates> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await?;

        let body = http::success_body(res, "Geocoding").await?;
        let parsed: GeoResponse = serde_json::from_str(&body)?;

        let first = parsed
            .results
            .first()
            .ok_or_else(|| WeatherError::NoMatchFound(city.to_string()))?;

        let coordinates = Coordinates::new(first.latitude, first.longitude)?;
        tracing::info!(city, %coordinates, "resolved location");
        Ok(coordinates)
    }
}
