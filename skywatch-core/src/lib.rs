//! Core library for the `skywatch` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind a provider seam
//! - Forecast aggregation and the dashboard view-state
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;

pub use client::openweather::OpenWeatherClient;
pub use client::{WeatherClient, client_from_config};
pub use config::Config;
pub use dashboard::{Dashboard, SearchToken, ViewState};
pub use error::ClientError;
pub use forecast::{DEFAULT_HORIZON_DAYS, aggregate_daily};
pub use icon::condition_icon;
pub use model::{CurrentConditions, DailyForecast, ForecastSample, Units};
