use thiserror::Error;

/// Errors returned by a places data source.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Overpass answered 200 but reported a runtime error in `remark`.
    #[error("Overpass API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors surfaced by [`CafeSearch`](crate::CafeSearch).
///
/// An empty result is not an error; it comes back as an empty `Vec`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cafe search within {radius_m} m failed: {source}")]
    SearchFailed {
        radius_m: u32,
        #[source]
        source: PlacesError,
    },
}
