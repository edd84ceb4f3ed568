//! Search orchestration and the view-state it mutates.
//!
//! `Dashboard` is the only writer of [`ViewState`]; the render layer reads
//! a snapshot through [`Dashboard::state`] and never mutates it.

use tracing::debug;

use crate::client::WeatherClient;
use crate::error::ClientError;
use crate::model::{CurrentConditions, DailyForecast, Units};

/// Fixed user-facing message for any failed fetch; the distinguishing
/// cause goes to the log only.
pub const FETCH_ERROR_MESSAGE: &str =
    "Unable to fetch weather data. Please check the location and try again.";

/// Message shown when the query is blank.
pub const BLANK_QUERY_MESSAGE: &str = "Please enter a location";

/// Everything the render layer needs to draw one screen.
///
/// Invariant: `current` and `forecast` are set together on success and
/// cleared together on failure — never left mixed.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Vec<DailyForecast>>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub units: Units,
}

/// Identifies one issued search. Outcomes whose token has been superseded
/// are discarded, so the last *issued* search wins rather than the last
/// one to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

#[derive(Debug)]
pub struct Dashboard<C> {
    client: C,
    state: ViewState,
    generation: u64,
}

impl<C: WeatherClient> Dashboard<C> {
    pub fn new(client: C) -> Self {
        Self::with_units(client, Units::default())
    }

    pub fn with_units(client: C, units: Units) -> Self {
        Self {
            client,
            state: ViewState {
                units,
                ..ViewState::default()
            },
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Run one search to completion: validate, fetch current conditions and
    /// the forecast concurrently, apply the joint outcome.
    pub async fn search(&mut self, query: &str) {
        let Some(token) = self.begin_search(query) else {
            return;
        };

        let (current, forecast) = tokio::join!(
            self.client.fetch_current(query),
            self.client.fetch_forecast(query),
        );

        let outcome = current.and_then(|current| forecast.map(|forecast| (current, forecast)));
        self.apply_outcome(token, outcome);
    }

    /// Validate the query and mark the dashboard loading.
    ///
    /// Returns `None` for blank input, with the validation message set and
    /// no request issued.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchToken> {
        if query.trim().is_empty() {
            self.state.error = Some(BLANK_QUERY_MESSAGE.to_string());
            return None;
        }

        self.generation += 1;
        self.state.is_loading = true;
        self.state.error = None;
        Some(SearchToken(self.generation))
    }

    /// Apply a search outcome for the given token.
    ///
    /// A stale token (a newer search has begun since) is dropped wholesale:
    /// neither payloads nor the loading flag change, since those now belong
    /// to the newer search.
    pub fn apply_outcome(
        &mut self,
        token: SearchToken,
        outcome: Result<(CurrentConditions, Vec<DailyForecast>), ClientError>,
    ) {
        if token.0 != self.generation {
            debug!(
                token = token.0,
                latest = self.generation,
                "discarding stale search outcome"
            );
            return;
        }

        self.state.is_loading = false;
        match outcome {
            Ok((current, forecast)) => {
                self.state.current = Some(current);
                self.state.forecast = Some(forecast);
                self.state.error = None;
            }
            Err(err) => {
                debug!(%err, "search failed");
                // Partial success is not surfaced: both payloads go.
                self.state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.state.current = None;
                self.state.forecast = None;
            }
        }
    }

    pub fn toggle_units(&mut self) {
        self.state.units = self.state.units.toggle();
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeClient {
        calls: Arc<AtomicUsize>,
        fail_current: Arc<AtomicBool>,
        fail_forecast: Arc<AtomicBool>,
    }

    #[async_trait]
    impl WeatherClient for FakeClient {
        async fn fetch_current(&self, query: &str) -> Result<CurrentConditions, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_current.load(Ordering::SeqCst) {
                return Err(ClientError::Request("current unavailable".to_string()));
            }
            Ok(sample_current(query))
        }

        async fn fetch_forecast(&self, _query: &str) -> Result<Vec<DailyForecast>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_forecast.load(Ordering::SeqCst) {
                return Err(ClientError::Request("forecast unavailable".to_string()));
            }
            Ok(vec![sample_day("Sat, Aug 9")])
        }
    }

    fn sample_current(location: &str) -> CurrentConditions {
        CurrentConditions {
            location: location.to_string(),
            temperature: 68,
            condition: "Clouds".to_string(),
            humidity: 72,
            wind_speed: 9.8,
            visibility_miles: "5.0".to_string(),
            pressure: 1012,
            icon: "⛅",
        }
    }

    fn sample_day(date: &str) -> DailyForecast {
        DailyForecast {
            date: date.to_string(),
            temperature: 70,
            condition: "Clear".to_string(),
            icon: "☀️",
        }
    }

    #[tokio::test]
    async fn blank_query_sets_error_without_any_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = FakeClient {
            calls: Arc::clone(&calls),
            ..FakeClient::default()
        };
        let mut dashboard = Dashboard::new(client);

        dashboard.search("   ").await;

        assert_eq!(
            dashboard.state().error.as_deref(),
            Some(BLANK_QUERY_MESSAGE)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!dashboard.state().is_loading);
        assert!(dashboard.state().current.is_none());
    }

    #[tokio::test]
    async fn joint_success_sets_both_payloads() {
        let mut dashboard = Dashboard::new(FakeClient::default());

        dashboard.search("London").await;

        let state = dashboard.state();
        assert!(state.current.is_some());
        assert!(state.forecast.is_some());
        assert!(state.error.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn forecast_failure_clears_both_payloads() {
        let fail_forecast = Arc::new(AtomicBool::new(false));
        let client = FakeClient {
            fail_forecast: Arc::clone(&fail_forecast),
            ..FakeClient::default()
        };
        let mut dashboard = Dashboard::new(client);

        dashboard.search("London").await;
        assert!(dashboard.state().current.is_some());

        // The current fetch still succeeds; only the forecast fails.
        fail_forecast.store(true, Ordering::SeqCst);
        dashboard.search("Paris").await;

        let state = dashboard.state();
        assert!(state.current.is_none());
        assert!(state.forecast.is_none());
        assert_eq!(state.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn current_failure_clears_both_payloads() {
        let client = FakeClient {
            fail_current: Arc::new(AtomicBool::new(true)),
            ..FakeClient::default()
        };
        let mut dashboard = Dashboard::new(client);

        dashboard.search("London").await;

        let state = dashboard.state();
        assert!(state.current.is_none());
        assert!(state.forecast.is_none());
        assert_eq!(state.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn next_search_clears_previous_error() {
        let fail_current = Arc::new(AtomicBool::new(true));
        let client = FakeClient {
            fail_current: Arc::clone(&fail_current),
            ..FakeClient::default()
        };
        let mut dashboard = Dashboard::new(client);

        dashboard.search("Nowhere").await;
        assert!(dashboard.state().error.is_some());

        fail_current.store(false, Ordering::SeqCst);
        dashboard.search("London").await;
        assert!(dashboard.state().error.is_none());
        assert!(dashboard.state().current.is_some());
    }

    #[test]
    fn stale_outcome_is_discarded_wholesale() {
        let mut dashboard = Dashboard::new(FakeClient::default());

        let first = dashboard.begin_search("London").unwrap();
        let second = dashboard.begin_search("Tokyo").unwrap();

        dashboard.apply_outcome(
            second,
            Ok((sample_current("Tokyo, JP"), vec![sample_day("Sat, Aug 9")])),
        );

        // The slower first search resolves afterwards with an error; it
        // must not disturb what the second search put in place.
        dashboard.apply_outcome(first, Err(ClientError::Request("slow failure".to_string())));

        let state = dashboard.state();
        assert_eq!(
            state.current.as_ref().map(|c| c.location.as_str()),
            Some("Tokyo, JP")
        );
        assert!(state.forecast.is_some());
        assert!(state.error.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn stale_outcome_does_not_clear_loading_of_newer_search() {
        let mut dashboard = Dashboard::new(FakeClient::default());

        let first = dashboard.begin_search("London").unwrap();
        let _second = dashboard.begin_search("Tokyo").unwrap();

        dashboard.apply_outcome(
            first,
            Ok((sample_current("London, GB"), vec![sample_day("Sat, Aug 9")])),
        );

        // Still waiting on the Tokyo search.
        assert!(dashboard.state().is_loading);
        assert!(dashboard.state().current.is_none());
    }

    #[test]
    fn toggle_units_flips_the_preference() {
        let mut dashboard = Dashboard::new(FakeClient::default());
        assert_eq!(dashboard.state().units, Units::Celsius);

        dashboard.toggle_units();
        assert_eq!(dashboard.state().units, Units::Fahrenheit);

        dashboard.toggle_units();
        assert_eq!(dashboard.state().units, Units::Celsius);
    }

    #[test]
    fn dismiss_error_clears_only_the_message() {
        let mut dashboard = Dashboard::new(FakeClient::default());
        dashboard.begin_search("");

        assert!(dashboard.state().error.is_some());
        dashboard.dismiss_error();
        assert!(dashboard.state().error.is_none());
    }
}
