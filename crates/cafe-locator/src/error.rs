use thiserror::Error;

/// Why a location provider could not produce a fix.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("no location fix within {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },

    #[error("location service unsupported: {0}")]
    Unsupported(String),

    #[error("location provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors returned by [`Locator`](crate::Locator).
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Surface to the user with a manual retry; the locator never retries.
    #[error("location unavailable: {source}")]
    LocationUnavailable {
        #[from]
        source: LocationError,
    },
}
