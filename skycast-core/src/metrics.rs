//! Derived values computed from a report.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Apparent temperature from temperature, wind speed (km/h) and relative humidity (%).
///
/// Steadman's approximation, rounded to one decimal place:
/// `T + 0.33 * e - 0.7 * v - 4.0` where `e` is vapour pressure in hPa and `v` is wind in m/s.
/// The constants assume Celsius input.
pub fn compute_feels_like(temperature: f64, wind_kmh: f64, humidity_pct: f64) -> f64 {
    let wind_ms = wind_kmh / 3.6;
    let vapour_pressure =
        humidity_pct / 100.0 * 6.105 * (17.27 * temperature / (237.7 + temperature)).exp();

    round_to_tenth(temperature + 0.33 * vapour_pressure - 0.7 * wind_ms - 4.0)
}

/// Whole-degree midpoint of a day's high and low; halves round up.
pub fn average_temperature(max: f64, min: f64) -> i64 {
    ((max + min) / 2.0 + 0.5).floor() as i64
}

/// Round on the exact decimal value of `value`, halves away from zero: 0.15 is stored as
/// 0.1499.. and becomes 0.1.
fn round_to_tenth(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
