use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("CAFE_ENV", "development"));
    let log_level = or_default("CAFE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("CAFE_DATA_DIR", "./.cafe-finder"));
    let overpass_url = or_default(
        "CAFE_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let geoip_url = or_default("CAFE_GEOIP_URL", "http://ip-api.com/json");
    let user_agent = or_default(
        "CAFE_USER_AGENT",
        "cafe-finder/0.1 (+https://openstreetmap.org)",
    );

    let http_timeout_secs: u64 = parse_as(
        "CAFE_HTTP_TIMEOUT_SECS",
        &or_default("CAFE_HTTP_TIMEOUT_SECS", "30"),
    )?;
    let narrow_radius_m: u32 = parse_as(
        "CAFE_NARROW_RADIUS_M",
        &or_default("CAFE_NARROW_RADIUS_M", "1000"),
    )?;
    let broad_radius_m: u32 = parse_as(
        "CAFE_BROAD_RADIUS_M",
        &or_default("CAFE_BROAD_RADIUS_M", "5000"),
    )?;
    let max_results: usize =
        parse_as("CAFE_MAX_RESULTS", &or_default("CAFE_MAX_RESULTS", "5"))?;
    let location_ttl_secs: u64 = parse_as(
        "CAFE_LOCATION_TTL_SECS",
        &or_default("CAFE_LOCATION_TTL_SECS", "600"),
    )?;
    let location_timeout_secs: u64 = parse_as(
        "CAFE_LOCATION_TIMEOUT_SECS",
        &or_default("CAFE_LOCATION_TIMEOUT_SECS", "10"),
    )?;

    if broad_radius_m <= narrow_radius_m {
        return Err(ConfigError::InvalidEnvVar {
            var: "CAFE_BROAD_RADIUS_M".to_string(),
            reason: format!(
                "broad radius ({broad_radius_m}) must exceed narrow radius ({narrow_radius_m})"
            ),
        });
    }

    if max_results == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CAFE_MAX_RESULTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        overpass_url,
        geoip_url,
        http_timeout_secs,
        user_agent,
        narrow_radius_m,
        broad_radius_m,
        max_results,
        location_ttl_secs,
        location_timeout_secs,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
