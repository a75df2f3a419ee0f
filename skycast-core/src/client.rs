use std::sync::Arc;

use crate::{
    error::LookupError,
    geolocation::Geolocator,
    model::{Coordinates, Location, WeatherSnapshot},
    notify::{Notice, Notifier},
    provider::WeatherProvider,
};

/// First-day maximum above which a heat alert is raised.
pub const HEAT_ALERT_THRESHOLD_C: f64 = 40.0;

pub const HEAT_ALERT_MESSAGE: &str = "Heat alert: Today's temperature exceeds 40°C.";

/// Label shown for lookups made from the device position.
pub const MY_LOCATION_LABEL: &str = "My Location";

/// Runs lookups against a [`WeatherProvider`] and raises advisory notices.
#[derive(Debug)]
pub struct WeatherClient {
    provider: Box<dyn WeatherProvider>,
    notifier: Arc<dyn Notifier>,
}

impl WeatherClient {
    pub fn new(provider: Box<dyn WeatherProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self { provider, notifier }
    }

    /// Resolve a place name to a labelled location.
    pub async fn geocode(&self, query: &str) -> Result<Location, LookupError> {
        let best = self.provider.geocode(query).await?;
        Ok(Location::from(best))
    }

    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, LookupError> {
        let at = Coordinates {
            latitude,
            longitude,
        };
        self.provider.fetch_forecast(at).await
    }

    /// Forecast for a known position, with the heat check applied.
    pub async fn lookup_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, LookupError> {
        let snapshot = self.fetch_forecast(latitude, longitude).await?;
        self.check_heat(&snapshot);
        Ok(snapshot)
    }

    /// Geocode `query`, then fetch its forecast. The caller is expected to
    /// record the returned location in the recents list.
    pub async fn lookup_by_query(
        &self,
        query: &str,
    ) -> Result<(Location, WeatherSnapshot), LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let location = self.geocode(query).await?;
        tracing::info!(query, label = %location.name, "Resolved location");

        let snapshot = self.lookup_by_coords(location.latitude, location.longitude).await?;
        Ok((location, snapshot))
    }

    /// Forecast for wherever `geolocator` says the device is.
    pub async fn lookup_here(
        &self,
        geolocator: &dyn Geolocator,
    ) -> Result<(Location, WeatherSnapshot), LookupError> {
        let at = geolocator.current_position().await?;
        let snapshot = self.lookup_by_coords(at.latitude, at.longitude).await?;
        Ok((Location::new(MY_LOCATION_LABEL, at.latitude, at.longitude), snapshot))
    }

    fn check_heat(&self, snapshot: &WeatherSnapshot) {
        if let Some(max) = snapshot.today_max_c().filter(|&t| t > HEAT_ALERT_THRESHOLD_C) {
            tracing::info!(max, "Heat alert raised");
            self.notifier.notify(Notice::warning(HEAT_ALERT_MESSAGE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GeolocationError,
        geolocation::{DisabledGeolocator, FixedGeolocator},
        model::{ForecastDay, GeocodeMatch},
        notify::NoticeLevel,
    };
    use async_trait::async_trait;
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

    #[derive(Debug)]
    struct StubProvider {
        hit: Option<GeocodeMatch>,
        today_max: f64,
        forecast_calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(hit: Option<GeocodeMatch>, today_max: f64) -> Self {
            Self {
                hit,
                today_max,
                forecast_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for Arc<StubProvider> {
        async fn geocode(&self, query: &str) -> Result<GeocodeMatch, LookupError> {
            self.hit.clone().ok_or_else(|| LookupError::NoResults {
                query: query.to_string(),
            })
        }

        async fn fetch_forecast(&self, _at: Coordinates) -> Result<WeatherSnapshot, LookupError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherSnapshot {
                daily: vec![ForecastDay {
                    temp_max_c: Some(self.today_max),
                    ..Default::default()
                }],
                ..Default::default()
            })
        }
    }

    fn paris() -> GeocodeMatch {
        GeocodeMatch {
            name: "Paris".to_string(),
            country: Some("France".to_string()),
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    fn make_client(stub: &Arc<StubProvider>) -> (WeatherClient, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let client = WeatherClient::new(Box::new(Arc::clone(stub)), recorder.clone());
        (client, recorder)
    }

    #[tokio::test]
    async fn blank_query_makes_no_calls() {
        let stub = Arc::new(StubProvider::new(Some(paris()), 20.0));
        let (client, _) = make_client(&stub);

        let err = client.lookup_by_query("   ").await.unwrap_err();
        assert!(matches!(err, LookupError::EmptyQuery));
        assert_eq!(stub.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_results_skips_forecast() {
        let stub = Arc::new(StubProvider::new(None, 20.0));
        let (client, _) = make_client(&stub);

        let err = client.lookup_by_query("Atlantis").await.unwrap_err();
        assert!(matches!(err, LookupError::NoResults { ref query } if query == "Atlantis"));
        assert_eq!(stub.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn heat_alert_above_threshold_only() {
        let hot = Arc::new(StubProvider::new(Some(paris()), 42.0));
        let (client, recorder) = make_client(&hot);
        let (location, _) = client.lookup_by_query("Paris").await.unwrap();
        assert_eq!(location.name, "Paris, France");

        let notices = recorder.0.lock().unwrap().clone();
        assert_eq!(notices, vec![Notice::warning(HEAT_ALERT_MESSAGE)]);
        assert_eq!(notices[0].level, NoticeLevel::Warning);

        let boundary = Arc::new(StubProvider::new(Some(paris()), 40.0));
        let (client, recorder) = make_client(&boundary);
        client.lookup_by_query("Paris").await.unwrap();
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookup_here_uses_geolocator() {
        let stub = Arc::new(StubProvider::new(None, 45.0));
        let (client, recorder) = make_client(&stub);
        let fixed = FixedGeolocator(Coordinates {
            latitude: 25.2,
            longitude: 55.3,
        });

        let (location, snapshot) = client.lookup_here(&fixed).await.unwrap();
        assert_eq!(location, Location::new(MY_LOCATION_LABEL, 25.2, 55.3));
        assert_eq!(snapshot.today_max_c(), Some(45.0));
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lookup_here_surfaces_geolocation_errors() {
        let stub = Arc::new(StubProvider::new(None, 20.0));
        let (client, _) = make_client(&stub);

        let err = client.lookup_here(&DisabledGeolocator).await.unwrap_err();
        assert!(matches!(err, LookupError::Geolocation(GeolocationError::Unsupported)));
        assert_eq!(stub.forecast_calls.load(Ordering::SeqCst), 0);
    }
}
