//! Condition-label-to-glyph mapping for the dashboard.

/// Glyph shown for condition labels outside the known set.
pub const DEFAULT_ICON: &str = "🌤️";

/// Map a provider condition group to a display glyph.
///
/// Matching is case-insensitive; mist and fog share a glyph. Unrecognized
/// labels (including the empty string) fall back to [`DEFAULT_ICON`].
pub fn condition_icon(condition: &str) -> &'static str {
    match condition.to_lowercase().as_str() {
        "clear" => "☀️",
        "clouds" => "⛅",
        "rain" => "🌧️",
        "snow" => "❄️",
        "thunderstorm" => "🌩️",
        "drizzle" => "🌦️",
        "mist" | "fog" => "🌫️",
        _ => DEFAULT_ICON,
    }
}
