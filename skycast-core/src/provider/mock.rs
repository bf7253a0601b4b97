use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::Result,
    location::MockCity,
    model::{
        ConditionLabel, Coordinates, CurrentConditions, DailySeries, FORECAST_DAYS, UnitSystem,
        WeatherReport,
    },
};

use super::WeatherProvider;

/// Offline provider producing randomized placeholder data for the mock cities.
#[derive(Debug)]
pub struct MockProvider {
    rng: Mutex<StdRng>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl MockProvider {
    /// Deterministic provider, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Build a report for `city` whose first day is `today`.
    pub fn report_for(&self, city: MockCity, today: NaiveDate) -> WeatherReport {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        WeatherReport {
            current: CurrentConditions {
                temperature: city.base_temperature(),
                wind_speed: city.wind_speed(),
            },
            daily: generate_daily(city.base_temperature(), today, &mut *rng),
        }
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn get_report(
        &self,
        coordinates: Coordinates,
        unit: UnitSystem,
    ) -> Result<WeatherReport> {
        let city = MockCity::nearest(&coordinates);
        // Placeholder readings are not unit-converted.
        tracing::debug!(%city, %unit, "generating mock report");
        Ok(self.report_for(city, Local::now().date_naive()))
    }
}

/// Seven days of placeholder data around `base`.
///
/// Highs are `base + [0,4]` and lows `base - [0,4]`, drawn independently, so a low may
/// exceed the high of the same day.
pub fn generate_daily<R: Rng + ?Sized>(base: f64, today: NaiveDate, rng: &mut R) -> DailySeries {
    let days = 0..FORECAST_DAYS as u64;

    DailySeries {
        time: days.clone().map(|i| today + Days::new(i)).collect(),
        temperature_2m_max: days.clone().map(|_| Some(base + roll(rng, 5))).collect(),
        temperature_2m_min: days.clone().map(|_| Some(base - roll(rng, 5))).collect(),
        wind_speed_10m_max: days.clone().map(|_| Some(10.0 + roll(rng, 5))).collect(),
        wind_gusts_10m_max: days.clone().map(|_| Some(20.0 + roll(rng, 10))).collect(),
        relative_humidity_2m_mean: days.clone().map(|_| Some(50.0 + roll(rng, 10))).collect(),
        apparent_temperature_max: days.clone().map(|_| Some(base + roll(rng, 3))).collect(),
        precipitation_probability_mean: days.clone().map(|_| Some(roll(rng, 50))).collect(),
        precipitation_sum: days.clone().map(|_| Some(roll(rng, 10))).collect(),
        weathercode: days
            .map(|_| {
                let codes = ConditionLabel::KNOWN_CODES;
                Some(codes[rng.gen_range(0..codes.len())])
            })
            .collect(),
    }
}

/// Uniform whole number in `[0, below)`.
fn roll<R: Rng + ?Sized>(rng: &mut R, below: u32) -> f64 {
    f64::from(rng.gen_range(0..below))
}
