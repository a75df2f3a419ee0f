use std::sync::Arc;

use anyhow::Result;
use skycast_core::{
    Config, Geolocator, Location, LookupError, Notice, Notifier, Presenter, RecentsStore,
    TemperatureUnit, WeatherClient, WeatherSnapshot, WeatherView,
    geolocation::geolocator_from_config, presenter::Ticket, provider::provider_from_config,
    storage::{FileStore, KeyValueStore},
};

use crate::output::{self, ConsoleNotifier};

/// Everything one front-end session needs: lookups, recents and view state.
pub struct App<S = FileStore> {
    client: WeatherClient,
    geolocator: Box<dyn Geolocator>,
    recents: RecentsStore<S>,
    presenter: Presenter,
    notifier: Arc<dyn Notifier>,
}

impl App {
    pub fn new(
        config: &Config,
        unit: TemperatureUnit,
        geolocator: Option<Box<dyn Geolocator>>,
    ) -> Result<Self> {
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
        let geolocator = match geolocator {
            Some(g) => g,
            None => geolocator_from_config(config)?,
        };
        let client = WeatherClient::new(provider_from_config(config)?, notifier.clone());
        let store = FileStore::new(config.recents_dir()?);

        Ok(Self::with_parts(client, geolocator, store, unit, notifier))
    }
}

impl<S: KeyValueStore> App<S> {
    pub fn with_parts(
        client: WeatherClient,
        geolocator: Box<dyn Geolocator>,
        store: S,
        unit: TemperatureUnit,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            geolocator,
            recents: RecentsStore::new(store),
            presenter: Presenter::new(unit, notifier.clone()),
            notifier,
        }
    }

    pub fn recents(&self) -> Vec<Location> {
        self.recents.load()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.presenter.unit()
    }

    /// Look up a city by name and remember it on success.
    pub async fn search(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            self.presenter.reject(&LookupError::EmptyQuery);
            self.print_error_line();
            return false;
        }

        let ticket = self.presenter.begin();
        let outcome = match self.client.lookup_by_query(query).await {
            Ok((location, snapshot)) => {
                let label = location.name.clone();
                if let Err(e) = self.recents.add(location) {
                    tracing::debug!("{e:#}");
                    self.notifier.notify(Notice::warning("Could not save recent searches"));
                }
                Ok((label, snapshot))
            }
            Err(e) => Err(e),
        };

        self.present(ticket, outcome)
    }

    /// Look up the device position. Recents are left alone.
    pub async fn here(&mut self) -> bool {
        let ticket = self.presenter.begin();
        let outcome = self
            .client
            .lookup_here(self.geolocator.as_ref())
            .await
            .map(|(location, snapshot)| (location.name, snapshot));

        self.present(ticket, outcome)
    }

    /// Re-fetch a remembered location by its stored coordinates.
    pub async fn open_recent(&mut self, location: &Location) -> bool {
        let ticket = self.presenter.begin();
        let outcome = self
            .client
            .lookup_by_coords(location.latitude, location.longitude)
            .await
            .map(|snapshot| (location.name.clone(), snapshot));

        self.present(ticket, outcome)
    }

    pub fn toggle_unit(&mut self) {
        match self.presenter.toggle_unit() {
            Some(view) => output::print_view(&view),
            None => println!("Current conditions will be shown in °{}.", self.unit().symbol()),
        }
    }

    fn present(
        &mut self,
        ticket: Ticket,
        outcome: Result<(String, WeatherSnapshot), LookupError>,
    ) -> bool {
        let view: Option<WeatherView> = self.presenter.finish(ticket, outcome);
        match view {
            Some(view) => {
                output::print_view(&view);
                true
            }
            None => {
                self.print_error_line();
                false
            }
        }
    }

    fn print_error_line(&self) {
        if let Some(line) = self.presenter.error_line() {
            output::print_error_line(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skycast_core::{
        Coordinates, WeatherProvider,
        error::Service,
        geolocation::FixedGeolocator,
        model::{ForecastDay, GeocodeMatch},
        notify::NoticeLevel,
        storage::MemoryStore,
    };
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    #[derive(Debug, Default)]
    struct StubState {
        forecast_down: bool,
        geocode_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
    }

    /// Resolves any query to a fixed position. The forecast can be switched
    /// to a 503.
    #[derive(Debug, Clone, Default)]
    struct StubProvider(Arc<StubState>);

    impl StubProvider {
        fn forecast_down() -> Self {
            Self(Arc::new(StubState {
                forecast_down: true,
                ..Default::default()
            }))
        }

        fn calls(&self) -> (usize, usize) {
            (
                self.0.geocode_calls.load(Ordering::SeqCst),
                self.0.forecast_calls.load(Ordering::SeqCst),
            )
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn geocode(&self, query: &str) -> Result<GeocodeMatch, LookupError> {
            self.0.geocode_calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeocodeMatch {
                name: query.to_string(),
                country: Some("Europe".to_string()),
                latitude: 48.85,
                longitude: 2.35,
            })
        }

        async fn fetch_forecast(&self, _at: Coordinates) -> Result<WeatherSnapshot, LookupError> {
            self.0.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if self.0.forecast_down {
                return Err(LookupError::Transport {
                    service: Service::Forecast,
                    reason: "status 503 Service Unavailable".to_string(),
                });
            }
            Ok(WeatherSnapshot {
                daily: vec![ForecastDay {
                    temp_max_c: Some(21.0),
                    ..Default::default()
                }],
                ..Default::default()
            })
        }
    }

    #[derive(Debug, Default)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn make_app<S: KeyValueStore>(stub: &StubProvider, store: S) -> (App<S>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let client = WeatherClient::new(Box::new(stub.clone()), recorder.clone());
        let here = FixedGeolocator(Coordinates {
            latitude: 25.2,
            longitude: 55.3,
        });
        let app = App::with_parts(
            client,
            Box::new(here),
            store,
            TemperatureUnit::Celsius,
            recorder.clone(),
        );
        (app, recorder)
    }

    #[tokio::test]
    async fn successful_search_is_remembered() {
        let stub = StubProvider::default();
        let (mut app, _) = make_app(&stub, MemoryStore::new());

        assert!(app.search("Paris").await);
        assert_eq!(app.recents(), vec![Location::new("Paris, Europe", 48.85, 2.35)]);
        assert_eq!(app.presenter.error_line(), None);
    }

    #[tokio::test]
    async fn forecast_failure_after_geocode_is_not_remembered() {
        let stub = StubProvider::forecast_down();
        let (mut app, recorder) = make_app(&stub, MemoryStore::new());

        assert!(!app.search("Paris").await);
        assert_eq!(stub.calls(), (1, 1));
        assert!(app.recents().is_empty());
        assert_eq!(
            app.presenter.error_line(),
            Some("Could not retrieve weather. Please try again.")
        );
        assert_eq!(recorder.0.lock().unwrap().clone(), vec![Notice::error("Fetch failed")]);
    }

    #[tokio::test]
    async fn here_leaves_recents_alone() {
        let stub = StubProvider::default();
        let (mut app, _) = make_app(&stub, MemoryStore::new());
        assert!(app.search("Paris").await);
        let before = app.recents();

        assert!(app.here().await);
        assert_eq!(app.recents(), before);
        assert_eq!(app.presenter.render().unwrap().location_label, "My Location");
    }

    #[tokio::test]
    async fn open_recent_does_not_reorder_recents() {
        let stub = StubProvider::default();
        let (mut app, _) = make_app(&stub, MemoryStore::new());
        assert!(app.search("Paris").await);
        assert!(app.search("Rome").await);
        let before = app.recents();
        assert_eq!(before[1].name, "Paris, Europe");

        assert!(app.open_recent(&before[1]).await);
        assert_eq!(app.recents(), before);
        assert_eq!(stub.calls(), (2, 3));
        assert_eq!(app.presenter.render().unwrap().location_label, "Paris, Europe");
    }

    #[tokio::test]
    async fn empty_query_makes_no_calls() {
        let stub = StubProvider::default();
        let (mut app, recorder) = make_app(&stub, MemoryStore::new());

        assert!(!app.search("   ").await);
        assert_eq!(stub.calls(), (0, 0));
        assert_eq!(app.presenter.error_line(), Some("Enter a city name to search."));
        assert!(app.recents().is_empty());

        let notices = recorder.0.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
    }

    #[tokio::test]
    async fn recents_write_failure_still_shows_weather() {
        let stub = StubProvider::default();
        let (mut app, recorder) = make_app(&stub, FailingStore);

        assert!(app.search("Paris").await);
        assert_eq!(app.presenter.error_line(), None);
        assert_eq!(app.presenter.render().unwrap().location_label, "Paris, Europe");
        assert_eq!(
            recorder.0.lock().unwrap().clone(),
            vec![Notice::warning("Could not save recent searches")]
        );
    }
}
