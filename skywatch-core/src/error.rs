use thiserror::Error;

/// Failures surfaced by a [`WeatherClient`](crate::client::WeatherClient).
///
/// One variant per failure class; no retries happen at any layer, a single
/// failed attempt surfaces to the caller as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The provider does not know the requested location.
    #[error("location not found: {0}")]
    NotFound(String),

    /// Transport failure, or a non-success status other than 404.
    #[error("weather request failed: {0}")]
    Request(String),

    /// The response body was not JSON, or lacked an expected field.
    #[error("unexpected provider response: {0}")]
    Parse(String),
}
