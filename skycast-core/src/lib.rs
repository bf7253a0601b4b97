//! Core library for the `skycast` weather widget.
//!
//! This crate defines:
//! - Location resolution (mock table or geocoding)
//! - Weather providers producing one normalized report shape
//! - Derived metrics (feels-like, daily average)
//! - The widget session and the dispatcher that performs its effects
//!
//! It is used by `skycast-cli`, but any other front end can drive the same session.

pub mod config;
pub mod countries;
pub mod dispatch;
pub mod error;
mod http;
pub mod location;
pub mod metrics;
pub mod model;
pub mod provider;
pub mod session;

pub use config::{Config, Endpoints};
pub use countries::{Country, CountryDirectory};
pub use dispatch::Dispatcher;
pub use error::WeatherError;
pub use location::{LocationResolver, MockCity, Selection};
pub use model::{
    ConditionLabel, Coordinates, CurrentConditions, DailySeries, DataMode, DayForecast,
    UnitSystem, WeatherReport,
};
pub use provider::{WeatherProvider, provider_for};
pub use session::{Effect, Event, FetchRequest, Session, Theme};
