use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WeatherError},
    metrics,
};

/// Number of calendar days in every daily series.
pub const FORECAST_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting values outside the valid geographic range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::MalformedResponse(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::MalformedResponse(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self { latitude, longitude })
    }

    /// Squared planar distance in degrees; only used to rank nearby points.
    pub fn distance_sq(&self, other: &Coordinates) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        dlat * dlat + dlon * dlon
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Temperature unit requested from upstream and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitSystem {
    /// Value of the `temperature_unit` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            UnitSystem::Celsius => "celsius",
            UnitSystem::Fahrenheit => "fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitSystem::Celsius => "°C",
            UnitSystem::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Celsius => UnitSystem::Fahrenheit,
            UnitSystem::Fahrenheit => UnitSystem::Celsius,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for UnitSystem {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "celsius" | "c" => Ok(UnitSystem::Celsius),
            "fahrenheit" | "f" => Ok(UnitSystem::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Where weather data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    #[default]
    Mock,
    Live,
}

impl DataMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Mock => "mock",
            DataMode::Live => "live",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "mock" => Ok(DataMode::Mock),
            "live" => Ok(DataMode::Live),
            _ => Err(anyhow::anyhow!(
                "Unknown data source '{value}'. Supported sources: mock, live."
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// In the unit the report was requested with.
    pub temperature: f64,
    /// km/h.
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
}

/// Seven index-aligned daily sequences. Field names follow the forecast service so a live
/// body deserializes without remapping.
///
/// Upstream sends `null` for a metric it cannot supply on some day; those entries are `None`
/// and still count towards the sequence length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
    pub wind_gusts_10m_max: Vec<Option<f64>>,
    pub relative_humidity_2m_mean: Vec<Option<f64>>,
    pub apparent_temperature_max: Vec<Option<f64>>,
    pub precipitation_probability_mean: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub weathercode: Vec<Option<i32>>,
}

/// One row of a [`DailySeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub wind_gust_max: Option<f64>,
    pub humidity_mean: Option<f64>,
    pub apparent_temperature_max: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub weather_code: Option<i32>,
}

impl DayForecast {
    /// A missing code reads as cloudy, like any code outside the known set.
    pub fn condition(&self) -> ConditionLabel {
        self.weather_code
            .map_or(ConditionLabel::Cloudy, ConditionLabel::classify)
    }

    /// `None` when either the high or the low is missing.
    pub fn average_temperature(&self) -> Option<i64> {
        Some(metrics::average_temperature(
            self.temperature_max?,
            self.temperature_min?,
        ))
    }
}

impl DailySeries {
    /// Check that every sequence holds exactly [`FORECAST_DAYS`] entries.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("time", self.time.len()),
            ("temperature_2m_max", self.temperature_2m_max.len()),
            ("temperature_2m_min", self.temperature_2m_min.len()),
            ("wind_speed_10m_max", self.wind_speed_10m_max.len()),
            ("wind_gusts_10m_max", self.wind_gusts_10m_max.len()),
            ("relative_humidity_2m_mean", self.relative_humidity_2m_mean.len()),
            ("apparent_temperature_max", self.apparent_temperature_max.len()),
            ("precipitation_probability_mean", self.precipitation_probability_mean.len()),
            ("precipitation_sum", self.precipitation_sum.len()),
            ("weathercode", self.weathercode.len()),
        ];

        for (name, len) in lengths {
            if len != FORECAST_DAYS {
                return Err(WeatherError::MalformedResponse(format!(
                    "daily.{name} has {len} entries, expected {FORECAST_DAYS}"
                )));
            }
        }
        Ok(())
    }

    pub fn day(&self, index: usize) -> Option<DayForecast> {
        Some(DayForecast {
            date: *self.time.get(index)?,
            temperature_max: *self.temperature_2m_max.get(index)?,
            temperature_min: *self.temperature_2m_min.get(index)?,
            wind_speed_max: *self.wind_speed_10m_max.get(index)?,
            wind_gust_max: *self.wind_gusts_10m_max.get(index)?,
            humidity_mean: *self.relative_humidity_2m_mean.get(index)?,
            apparent_temperature_max: *self.apparent_temperature_max.get(index)?,
            precipitation_probability: *self.precipitation_probability_mean.get(index)?,
            precipitation_sum: *self.precipitation_sum.get(index)?,
            weather_code: *self.weathercode.get(index)?,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = DayForecast> + '_ {
        (0..self.time.len()).map_while(|i| self.day(i))
    }
}

/// The normalized shape produced by every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(rename = "current_weather")]
    pub current: CurrentConditions,
    pub daily: DailySeries,
}

impl WeatherReport {
    pub fn validate(&self) -> Result<()> {
        self.daily.validate()
    }

    pub fn today(&self) -> Option<DayForecast> {
        self.daily.day(0)
    }

    /// Feels-like for the current moment, using today's mean humidity.
    ///
    /// The formula is evaluated on the report's own temperature unit, without converting
    /// Fahrenheit to Celsius first.
    pub fn feels_like(&self) -> Option<f64> {
        let humidity = self.daily.relative_humidity_2m_mean.first().copied().flatten()?;
        Some(metrics::compute_feels_like(
            self.current.temperature,
            self.current.wind_speed,
            humidity,
        ))
    }

    pub fn today_condition(&self) -> ConditionLabel {
        self.today()
            .map_or(ConditionLabel::Cloudy, |today| today.condition())
    }
}

/// Simplified condition shown next to a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionLabel {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Thunderstorm,
}

impl ConditionLabel {
    /// Weather codes the mock generator draws from.
    pub const KNOWN_CODES: [i32; 7] = [0, 1, 2, 3, 61, 71, 95];

    /// Map a weather code to a label. Total: unknown codes read as cloudy.
    pub fn classify(code: i32) -> Self {
        match code {
            0 => Self::Sunny,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            61 => Self::Rainy,
            71 => Self::Snowy,
            95 => Self::Thunderstorm,
            _ => Self::Cloudy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Thunderstorm => "Thunderstorm",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sunny => "sun",
            Self::PartlyCloudy => "cloud-sun",
            Self::Cloudy => "cloud",
            Self::Rainy => "cloud-showers-heavy",
            Self::Snowy => "snowflake",
            Self::Thunderstorm => "bolt",
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
