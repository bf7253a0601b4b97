use tracing::instrument;

use crate::{
    config::Config,
    countries::CountryDirectory,
    error::Result,
    location::{LocationResolver, Selection},
    model::{DataMode, WeatherReport},
    provider::{WeatherProvider, provider_for},
    session::{Effect, Event, FetchRequest, Session},
};

/// Performs session effects against the upstream services.
#[derive(Debug)]
pub struct Dispatcher {
    resolver: LocationResolver,
    directory: CountryDirectory,
    mock: Box<dyn WeatherProvider>,
    live: Box<dyn WeatherProvider>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Self {
        Self {
            resolver: LocationResolver::new(config.endpoints.geocoding.clone()),
            directory: CountryDirectory::new(config.endpoints.countries.clone()),
            mock: provider_for(DataMode::Mock, config),
            live: provider_for(DataMode::Live, config),
        }
    }

    /// Replace the provider used for `mode`.
    pub fn with_provider(mut self, mode: DataMode, provider: Box<dyn WeatherProvider>) -> Self {
        match mode {
            DataMode::Mock => self.mock = provider,
            DataMode::Live => self.live = provider,
        }
        self
    }

    fn provider(&self, mode: DataMode) -> &dyn WeatherProvider {
        match mode {
            DataMode::Mock => self.mock.as_ref(),
            DataMode::Live => self.live.as_ref(),
        }
    }

    /// Carry out one effect; the outcome is the event to feed back into the session.
    pub async fn perform(&self, effect: &Effect) -> Option<Event> {
        match effect {
            Effect::None => None,
            Effect::LoadLocations { generation, mode } => {
                let generation = *generation;
                Some(match self.directory.countries(*mode).await {
                    Ok(countries) => Event::LocationsLoaded {
                        generation,
                        countries,
                    },
                    Err(error) => Event::RequestFailed { generation, error },
                })
            }
            Effect::Fetch(request) => {
                let generation = request.generation;
                Some(match self.fetch(request).await {
                    Ok(report) => Event::ReportReady { generation, report },
                    Err(error) => Event::RequestFailed { generation, error },
                })
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, request: &FetchRequest) -> Result<WeatherReport> {
        let selection = Selection::for_mode(request.mode, &request.city)?;
        let coordinates = self.resolver.resolve(&selection).await?;
        self.provider(request.mode)
            .get_report(coordinates, request.unit)
            .await
    }

    /// Apply `event` and perform effects until the session settles.
    pub async fn run(&self, session: Session, event: Event) -> Session {
        let (mut session, mut effect) = session.update(event);
        while let Some(next) = self.perform(&effect).await {
            (session, effect) = session.update(next);
        }
        session
    }
}
