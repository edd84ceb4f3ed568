//! Stateless rendering of the dashboard view-state as text.
//!
//! Temperatures are stored in Fahrenheit; conversion to the preferred
//! display unit happens here and nowhere else.

use std::fmt::Write;

use skywatch_core::{CurrentConditions, DailyForecast, Units, ViewState};

pub fn render(state: &ViewState) {
    print!("{}", format_dashboard(state));
}

/// Build the full dashboard screen for one state snapshot.
pub fn format_dashboard(state: &ViewState) -> String {
    let mut out = String::new();

    if state.is_loading {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {error}");
    }
    if let Some(current) = &state.current {
        format_current(&mut out, current, state.units);
    }
    if let Some(forecast) = &state.forecast {
        format_forecast(&mut out, forecast, state.units);
    }

    out
}

fn format_current(out: &mut String, current: &CurrentConditions, units: Units) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}  {}", current.icon, current.location);
    let _ = writeln!(
        out,
        "  {}°{}  {}",
        units.display_temp(current.temperature),
        units.symbol(),
        current.condition
    );
    let _ = writeln!(out, "  Humidity    {:>6}%", current.humidity);
    let _ = writeln!(out, "  Wind        {:>6} mph", current.wind_speed);
    let _ = writeln!(out, "  Visibility  {:>6} mi", current.visibility_miles);
    let _ = writeln!(out, "  Pressure    {:>6} hPa", current.pressure);
}

fn format_forecast(out: &mut String, forecast: &[DailyForecast], units: Units) {
    if forecast.is_empty() {
        return;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "5-Day Forecast");
    for day in forecast {
        let _ = writeln!(
            out,
            "  {:<12}  {}  {:>4}°{}  {}",
            day.date,
            day.icon,
            units.display_temp(day.temperature),
            units.symbol(),
            day.condition
        );
    }
}
