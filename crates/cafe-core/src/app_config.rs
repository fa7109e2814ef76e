use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the café finder, resolved from `CAFE_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory backing the key-value store (one JSON file per key).
    pub data_dir: PathBuf,
    pub overpass_url: String,
    pub geoip_url: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// First, restrictive search radius in metres.
    pub narrow_radius_m: u32,
    /// Fallback radius used only when the narrow search yields nothing.
    pub broad_radius_m: u32,
    pub max_results: usize,
    /// How long a cached coordinate stays valid.
    pub location_ttl_secs: u64,
    pub location_timeout_secs: u64,
}
