//! Plain-text rendering of a report.

use std::fmt::Write;

use skycast_core::{ConditionLabel, DayForecast, Theme, UnitSystem, WeatherReport};

/// Shown in place of a value upstream did not supply.
const MISSING: &str = "–";

/// Terminal stand-in for the condition's icon.
fn glyph(condition: ConditionLabel) -> &'static str {
    match condition.icon_name() {
        "sun" => "☀",
        "cloud-sun" => "⛅",
        "cloud-showers-heavy" => "🌧",
        "snowflake" => "❄",
        "bolt" => "⚡",
        _ => "☁",
    }
}

fn reading<T: std::fmt::Display>(value: Option<T>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v}{suffix}"),
        None => MISSING.to_string(),
    }
}

fn heading(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Light => format!("\x1b[1m{text}\x1b[0m"),
        Theme::Dark => format!("\x1b[1;97;40m{text}\x1b[0m"),
    }
}

/// Today's block: date, condition, temperature, wind, humidity and feels-like.
pub fn current(report: &WeatherReport, unit: UnitSystem, city: &str, theme: Theme) -> String {
    let sym = unit.symbol();
    let mut out = String::new();

    if let Some(today) = report.today() {
        let date = today.date.format("%A, %B %-d, %Y");
        let _ = writeln!(out, "{}", heading(&format!("{city}: {date}"), theme));
    }

    let condition = report.today_condition();
    let _ = writeln!(out, "{} {}", glyph(condition), condition);
    let _ = writeln!(out, "{}{sym}", report.current.temperature);
    let _ = writeln!(out, "Wind: {} km/h", report.current.wind_speed);

    if let Some(today) = report.today() {
        let feels_like = report.feels_like().map(|v| format!("{v:.1}"));
        let _ = writeln!(out, "Humidity: {}", reading(today.humidity_mean, "%"));
        let _ = writeln!(out, "Feels Like: {}", reading(feels_like, sym));
    }

    out
}

fn card(day: &DayForecast, sym: &str, theme: Theme) -> String {
    let condition = day.condition();
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(&day.date.format("%a, %B %-d").to_string(), theme));
    let _ = writeln!(
        out,
        "  {} {}",
        glyph(condition),
        reading(day.average_temperature(), sym)
    );
    let _ = writeln!(out, "  {condition}");
    let _ = writeln!(out, "  H: {}", reading(day.temperature_max, sym));
    let _ = writeln!(out, "  L: {}", reading(day.temperature_min, sym));
    let _ = writeln!(out, "  Wind: {}", reading(day.wind_speed_max, " km/h"));
    let _ = writeln!(out, "  Gust: {}", reading(day.wind_gust_max, " km/h"));
    let _ = writeln!(out, "  Humidity: {}", reading(day.humidity_mean, "%"));
    let _ = writeln!(out, "  P.O.P: {}", reading(day.precipitation_probability, "%"));
    if let Some(rain) = day.precipitation_sum.filter(|mm| *mm > 0.0) {
        let _ = writeln!(out, "  Rain: {rain} mm");
    }

    out
}

/// One card per forecast day.
pub fn forecast(report: &WeatherReport, unit: UnitSystem, theme: Theme) -> String {
    report
        .daily
        .days()
        .map(|day| card(&day, unit.symbol(), theme))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use skycast_core::{CurrentConditions, DailySeries};

    fn present<T: Clone>(values: [T; 7]) -> Vec<Option<T>> {
        values.map(Some).to_vec()
    }

    fn report() -> WeatherReport {
        let start = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        WeatherReport {
            current: CurrentConditions {
                temperature: 18.0,
                wind_speed: 12.0,
            },
            daily: DailySeries {
                time: (0..7).map(|i| start + Days::new(i)).collect(),
                temperature_2m_max: present([21.0, 20.0, 19.0, 22.0, 18.0, 20.0, 21.0]),
                temperature_2m_min: present([15.0, 14.0, 17.0, 16.0, 18.0, 14.0, 15.0]),
                wind_speed_10m_max: present([11.0; 7]),
                wind_gusts_10m_max: present([25.0; 7]),
                relative_humidity_2m_mean: present([55.0, 50.0, 51.0, 52.0, 53.0, 54.0, 59.0]),
                apparent_temperature_max: present([19.0; 7]),
                precipitation_probability_mean: present([10.0; 7]),
                precipitation_sum: present([0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
                weathercode: present([0, 61, 1, 2, 3, 71, 95]),
            },
        }
    }

    #[test]
    fn current_block_shows_long_date_and_feels_like() {
        let out = current(&report(), UnitSystem::Celsius, "Calgary", Theme::Light);

        assert!(out.contains("Calgary: Saturday, October 17, 2026"));
        assert!(out.contains("☀ Sunny"));
        assert!(out.contains("18°C"));
        assert!(out.contains("Wind: 12 km/h"));
        assert!(out.contains("Humidity: 55%"));

        let feels_like = report().feels_like().unwrap();
        assert!(out.contains(&format!("Feels Like: {feels_like:.1}°C")));
    }

    #[test]
    fn forecast_has_seven_cards_and_rain_only_when_wet() {
        let out = forecast(&report(), UnitSystem::Fahrenheit, Theme::Dark);

        assert_eq!(out.matches("P.O.P:").count(), 7);
        assert_eq!(out.matches("Rain:").count(), 1);
        assert!(out.contains("Rain: 3 mm"));
        assert!(out.contains("Sun, October 18"));
        assert!(out.contains("H: 21°F"));
        assert!(out.contains("Rainy"));
    }

    #[test]
    fn card_shows_daily_midpoint() {
        // (19 + 17) / 2 = 18, (22 + 16) / 2 = 19
        let out = forecast(&report(), UnitSystem::Celsius, Theme::Light);
        assert!(out.contains("⛅ 18°C"));
        assert!(out.contains("⛅ 19°C"));
    }

    #[test]
    fn missing_values_render_as_dash() {
        let mut report = report();
        report.daily.temperature_2m_min[3] = None;
        report.daily.precipitation_probability_mean[0] = None;
        report.daily.precipitation_sum[1] = None;
        report.daily.relative_humidity_2m_mean[0] = None;

        let cards = forecast(&report, UnitSystem::Celsius, Theme::Light);
        assert!(cards.contains("L: –"));
        assert!(cards.contains("⛅ –"));
        assert!(cards.contains("P.O.P: –"));
        assert_eq!(cards.matches("Rain:").count(), 0);

        let today = current(&report, UnitSystem::Celsius, "Calgary", Theme::Light);
        assert!(today.contains("Humidity: –"));
        assert!(today.contains("Feels Like: –"));
    }

    #[test]
    fn glyph_follows_condition_icon() {
        assert_eq!(glyph(ConditionLabel::Sunny), "☀");
        assert_eq!(glyph(ConditionLabel::Rainy), "🌧");
        assert_eq!(glyph(ConditionLabel::Cloudy), "☁");
        assert_eq!(glyph(ConditionLabel::classify(999)), "☁");
    }
}
