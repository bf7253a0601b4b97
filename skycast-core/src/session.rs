//! Widget state as an explicit value, advanced by events.
//!
//! [`Session::update`] is pure: it returns the next session and the single effect the
//! caller should perform. Effects are carried out by [`crate::Dispatcher`], whose outcome
//! comes back as another [`Event`].

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    countries::{self, Country},
    error::WeatherError,
    model::{DataMode, UnitSystem, WeatherReport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Initial load of the location lists for the current data source.
    Start,
    SelectCity(String),
    ToggleUnit,
    ToggleTheme,
    SetDataSource(DataMode),
    LocationsLoaded {
        generation: u64,
        countries: Vec<Country>,
    },
    ReportReady {
        generation: u64,
        report: WeatherReport,
    },
    RequestFailed {
        generation: u64,
        error: WeatherError,
    },
}

/// Everything needed to produce one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub mode: DataMode,
    pub city: String,
    pub unit: UnitSystem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    LoadLocations { generation: u64, mode: DataMode },
    Fetch(FetchRequest),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub mode: DataMode,
    pub unit: UnitSystem,
    pub theme: Theme,
    pub city: Option<String>,
    pub countries: Vec<Country>,
    /// Last successful report; kept on failure.
    pub report: Option<WeatherReport>,
    pub last_error: Option<WeatherError>,
    /// City to select once the location list arrives, instead of the list default. Also
    /// fetched when the list cannot be loaded.
    preferred_city: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new(mode: DataMode, unit: UnitSystem) -> Self {
        Self {
            mode,
            unit,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_mode, config.default_unit)
            .with_preferred_city(config.default_city.clone())
    }

    pub fn with_preferred_city(mut self, city: Option<String>) -> Self {
        self.preferred_city = city;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Token of the most recent request; replies carrying any other value are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update(mut self, event: Event) -> (Session, Effect) {
        let effect = match event {
            Event::Start => self.load_locations(),
            Event::SetDataSource(mode) => {
                self.mode = mode;
                self.city = None;
                self.countries.clear();
                self.load_locations()
            }
            Event::SelectCity(city) => {
                self.city = Some(city);
                self.fetch()
            }
            Event::ToggleUnit => {
                self.unit = self.unit.toggled();
                self.fetch()
            }
            Event::ToggleTheme => {
                self.theme = self.theme.toggled();
                Effect::None
            }
            Event::LocationsLoaded {
                generation,
                countries,
            } => {
                if !self.accepts(generation) {
                    return (self, Effect::None);
                }
                self.city = self
                    .preferred_city
                    .take()
                    .or_else(|| countries::default_city(&countries, self.mode));
                self.countries = countries;
                self.fetch()
            }
            Event::ReportReady { generation, report } => {
                if self.accepts(generation) {
                    self.report = Some(report);
                    self.last_error = None;
                }
                Effect::None
            }
            Event::RequestFailed { generation, error } => {
                if !self.accepts(generation) {
                    return (self, Effect::None);
                }
                tracing::warn!(%error, "request failed; keeping previous report");
                self.last_error = Some(error);
                // A named city can be fetched without the location list.
                match self.preferred_city.take() {
                    Some(city) if self.city.is_none() => {
                        self.city = Some(city);
                        self.fetch()
                    }
                    _ => Effect::None,
                }
            }
        };

        (self, effect)
    }

    fn accepts(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale reply");
            return false;
        }
        true
    }

    fn load_locations(&mut self) -> Effect {
        self.generation += 1;
        Effect::LoadLocations {
            generation: self.generation,
            mode: self.mode,
        }
    }

    fn fetch(&mut self) -> Effect {
        let Some(city) = self.city.clone() else {
            return Effect::None;
        };
        self.generation += 1;
        Effect::Fetch(FetchRequest {
            generation: self.generation,
            mode: self.mode,
            city,
            unit: self.unit,
        })
    }
}
