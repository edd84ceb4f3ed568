use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::{CurrentConditions, DailyForecast};
use crate::{Config, client::openweather::OpenWeatherClient};

pub mod openweather;

/// Seam between the dashboard and the upstream weather provider.
///
/// Each call issues exactly one outbound request; there is no caching and
/// no deduplication of identical concurrent queries.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Current conditions for a named location.
    async fn fetch_current(&self, query: &str) -> Result<CurrentConditions, ClientError>;

    /// Upcoming daily forecast for a named location, already reduced to one
    /// entry per day.
    async fn fetch_forecast(&self, query: &str) -> Result<Vec<DailyForecast>, ClientError>;
}

/// Construct the OpenWeatherMap-backed client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.require_api_key()?;
    Ok(OpenWeatherClient::new(api_key.to_owned()))
}
