use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;
use crate::forecast::{DEFAULT_HORIZON_DAYS, aggregate_daily};
use crate::icon::condition_icon;
use crate::model::{CurrentConditions, DailyForecast, ForecastSample};

use super::WeatherClient;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Meters per statute mile, for the visibility readout.
const METERS_PER_MILE: f64 = 1609.34;

/// OpenWeatherMap client. Requests imperial units; the display layer owns
/// any conversion.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_owned())
    }

    /// Point the client at a different host; the HTTP tests aim it at a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn get_json<T>(&self, endpoint: &str, query: &str) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%endpoint, %query, "requesting OpenWeather endpoint");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await
            .map_err(|e| ClientError::Request(format!("OpenWeather {endpoint} request: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ClientError::Request(format!("reading OpenWeather {endpoint} response body: {e}"))
        })?;

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(query.to_owned()));
        }
        if !status.is_success() {
            return Err(ClientError::Request(format!(
                "OpenWeather {endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Meters.
    visibility: f64,
}

#[derive(Debug, Deserialize)]
struct OwEntryMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwEntryMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_current(&self, query: &str) -> Result<CurrentConditions, ClientError> {
        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or_else(|| {
                ClientError::Parse("current response carried no weather entries".to_string())
            })?;

        Ok(CurrentConditions {
            location: format!("{}, {}", parsed.name, parsed.sys.country),
            temperature: parsed.main.temp.round() as i32,
            icon: condition_icon(&condition),
            condition,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            visibility_miles: format!("{:.1}", parsed.visibility / METERS_PER_MILE),
            pressure: parsed.main.pressure,
        })
    }

    async fn fetch_forecast(&self, query: &str) -> Result<Vec<DailyForecast>, ClientError> {
        let parsed: OwForecastResponse = self.get_json("forecast", query).await?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let condition = entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.main)
                    .ok_or_else(|| {
                        ClientError::Parse(
                            "forecast entry carried no weather entries".to_string(),
                        )
                    })?;

                Ok(ForecastSample {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    condition,
                })
            })
            .collect::<Result<Vec<_>, ClientError>>()?;

        Ok(aggregate_daily(
            &samples,
            Utc::now().date_naive(),
            DEFAULT_HORIZON_DAYS,
        ))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
