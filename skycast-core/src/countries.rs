//! Country and city lists used to offer selections.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::Result,
    http,
    location::{MOCK_COUNTRY, MockCity},
    model::DataMode,
};

pub const DEFAULT_COUNTRIES_URL: &str = "https://countriesnow.space/api/v0.1/countries";

/// Country selected first in live mode when the list contains it.
const PREFERRED_COUNTRY: &str = "Canada";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    data: Vec<Country>,
}

#[derive(Debug, Clone)]
pub struct CountryDirectory {
    http: Client,
    countries_url: String,
}

impl Default for CountryDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRIES_URL)
    }
}

impl CountryDirectory {
    pub fn new(countries_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            countries_url: countries_url.into(),
        }
    }

    /// Countries and their cities available for `mode`.
    pub async fn countries(&self, mode: DataMode) -> Result<Vec<Country>> {
        match mode {
            DataMode::Mock => Ok(mock_countries()),
            DataMode::Live => self.fetch().await,
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self) -> Result<Vec<Country>> {
        let res = self.http.get(&self.countries_url).send().await?;
        let body = http::success_body(res, "Country list").await?;
        let parsed: CountriesResponse = serde_json::from_str(&body)?;

        tracing::debug!(count = parsed.data.len(), "loaded country list");
        Ok(parsed.data)
    }
}

pub fn mock_countries() -> Vec<Country> {
    vec![Country {
        country: MOCK_COUNTRY.to_string(),
        cities: MockCity::all().iter().map(|c| c.name().to_string()).collect(),
    }]
}

/// Cities listed for `country`, empty when it is unknown.
pub fn cities_of<'a>(countries: &'a [Country], country: &str) -> &'a [String] {
    countries
        .iter()
        .find(|c| c.country == country)
        .map(|c| c.cities.as_slice())
        .unwrap_or_default()
}

/// City selected right after a list loads.
pub fn default_city(countries: &[Country], mode: DataMode) -> Option<String> {
    match mode {
        DataMode::Mock => Some(MockCity::Calgary.name().to_string()),
        DataMode::Live => cities_of(countries, PREFERRED_COUNTRY)
            .first()
            .or_else(|| countries.iter().find_map(|c| c.cities.first()))
            .cloned(),
    }
}
