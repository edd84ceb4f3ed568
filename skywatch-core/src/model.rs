use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single 3-hour interval from the provider's forecast feed.
///
/// Transient: built per response, consumed by
/// [`aggregate_daily`](crate::forecast::aggregate_daily), then dropped.
#[derive(Debug, Clone)]
pub struct ForecastSample {
    /// Epoch seconds, UTC.
    pub timestamp: i64,
    /// Temperature in the provider's unit system (Fahrenheit).
    pub temperature: f64,
    /// Condition group label, e.g. "Clouds" or "Rain".
    pub condition: String,
}

/// One forecast day, reduced to its noon-closest sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyForecast {
    /// Display date: weekday, month, day number — "Tue, Aug 11".
    pub date: String,
    /// Rounded temperature, Fahrenheit.
    pub temperature: i32,
    pub condition: String,
    pub icon: &'static str,
}

/// Current conditions for a location, normalized from the provider payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// "Name, CC", e.g. "London, GB".
    pub location: String,
    /// Rounded temperature, Fahrenheit.
    pub temperature: i32,
    pub condition: String,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Wind speed, mph.
    pub wind_speed: f64,
    /// Visibility in statute miles, pre-formatted to one decimal.
    pub visibility_miles: String,
    /// Sea-level pressure, hPa.
    pub pressure: u32,
    pub icon: &'static str,
}

/// Display unit preference. Stored readings stay Fahrenheit; conversion
/// happens on render only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    pub fn toggle(self) -> Self {
        match self {
            Units::Celsius => Units::Fahrenheit,
            Units::Fahrenheit => Units::Celsius,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Units::Celsius => 'C',
            Units::Fahrenheit => 'F',
        }
    }

    /// Convert a stored Fahrenheit reading for display.
    pub fn display_temp(self, fahrenheit: i32) -> i32 {
        match self {
            Units::Fahrenheit => fahrenheit,
            Units::Celsius => (f64::from(fahrenheit - 32) * 5.0 / 9.0).round() as i32,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Units::Celsius => "celsius",
            Units::Fahrenheit => "fahrenheit",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "celsius" => Ok(Units::Celsius),
            "f" | "fahrenheit" => Ok(Units::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{s}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}
