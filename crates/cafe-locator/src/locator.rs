//! Location acquisition with a persisted, time-limited cache.

use std::time::Duration;

use cafe_core::{AppConfig, CachedCoordinate, Coordinate};
use cafe_store::{read_json, write_json, KvStore, StoreError, LOCATION_KEY};
use chrono::{DateTime, Utc};

use crate::error::{LocationError, LocatorError};
use crate::provider::{LocationProvider, PositionOptions};

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Wraps a [`LocationProvider`] with a cache stored under [`LOCATION_KEY`].
///
/// A cached coordinate younger than the TTL is returned without touching the
/// provider. Otherwise the provider is asked for a fresh fix (bounded by
/// `options.timeout`) and the result overwrites the cache.
pub struct Locator<P, S> {
    provider: P,
    store: S,
    cache_ttl: Duration,
    options: PositionOptions,
}

impl<P: LocationProvider, S: KvStore> Locator<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        Self {
            provider,
            store,
            cache_ttl: DEFAULT_CACHE_TTL,
            options: PositionOptions::default(),
        }
    }

    pub fn from_config(provider: P, store: S, config: &AppConfig) -> Self {
        Self::new(provider, store)
            .with_cache_ttl(Duration::from_secs(config.location_ttl_secs))
            .with_options(PositionOptions {
                timeout: Duration::from_secs(config.location_timeout_secs),
                ..PositionOptions::default()
            })
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the user's coordinate, from cache when still fresh.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::LocationUnavailable`] when the provider fails
    /// or does not answer within the configured timeout.
    pub async fn acquire_location(&self) -> Result<Coordinate, LocatorError> {
        self.acquire_location_at(Utc::now()).await
    }

    /// [`acquire_location`](Self::acquire_location) evaluated at `now`.
    ///
    /// # Errors
    ///
    /// Same as [`acquire_location`](Self::acquire_location).
    pub async fn acquire_location_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Coordinate, LocatorError> {
        let now_ms = now.timestamp_millis();
        let ttl_ms = i64::try_from(self.cache_ttl.as_millis()).unwrap_or(i64::MAX);

        if let Some(cached) = self.cached() {
            let age_ms = now_ms.saturating_sub(cached.timestamp);
            if cached.is_fresh(now_ms, ttl_ms) {
                tracing::info!(age_ms, "using cached location");
                return Ok(cached.coordinate);
            }
            tracing::debug!(age_ms, "cached location expired");
        }

        let fix = tokio::time::timeout(
            self.options.timeout,
            self.provider.current_position(&self.options),
        )
        .await;

        let coordinate = match fix {
            Ok(Ok(coordinate)) => coordinate,
            Ok(Err(source)) => {
                tracing::warn!(error = %source, "location provider failed");
                return Err(source.into());
            }
            Err(_elapsed) => {
                let source = LocationError::Timeout {
                    timeout_ms: self.options.timeout.as_millis(),
                };
                tracing::warn!(error = %source, "location provider timed out");
                return Err(source.into());
            }
        };

        let entry = CachedCoordinate::new(coordinate, now_ms);
        if let Err(e) = write_json(&self.store, LOCATION_KEY, &entry) {
            tracing::warn!(error = %e, "failed to cache location");
        }
        tracing::info!(%coordinate, "acquired fresh location");
        Ok(coordinate)
    }

    /// The stored coordinate, regardless of age. Unreadable entries are
    /// treated as absent.
    #[must_use]
    pub fn cached(&self) -> Option<CachedCoordinate> {
        match read_json::<CachedCoordinate, _>(&self.store, LOCATION_KEY) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable cached location");
                None
            }
        }
    }

    /// Forgets the cached coordinate so the next call asks the provider.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cache entry cannot be removed.
    pub fn clear_cache(&self) -> Result<(), StoreError> {
        self.store.remove(LOCATION_KEY)
    }
}
