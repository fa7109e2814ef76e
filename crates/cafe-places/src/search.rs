//! Café search with a single broadened-radius fallback.

use std::sync::atomic::{AtomicU64, Ordering};

use cafe_core::{AppConfig, Coordinate, NormalizedCafe};

use crate::error::SearchError;
use crate::normalize::normalize_places;
use crate::source::PlacesSource;
use crate::types::{Category, PlacesQuery};

/// Narrow and broad search radii, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRadii {
    pub narrow_m: u32,
    pub broad_m: u32,
}

impl Default for SearchRadii {
    fn default() -> Self {
        Self {
            narrow_m: 1_000,
            broad_m: 5_000,
        }
    }
}

/// Searches a [`PlacesSource`] for cafés around a coordinate.
///
/// Each call issues at most two lookups: one within the narrow radius and,
/// only when that normalizes to nothing, one within the broad radius. Both go
/// through [`normalize_places`] and are truncated to `max_results`.
pub struct CafeSearch<P> {
    source: P,
    radii: SearchRadii,
    max_results: usize,
    category: Category,
}

impl<P: PlacesSource> CafeSearch<P> {
    pub fn new(source: P, radii: SearchRadii, max_results: usize) -> Self {
        Self {
            source,
            radii,
            max_results,
            category: Category::cafe(),
        }
    }

    pub fn from_config(source: P, config: &AppConfig) -> Self {
        Self::new(
            source,
            SearchRadii {
                narrow_m: config.narrow_radius_m,
                broad_m: config.broad_radius_m,
            },
            config.max_results,
        )
    }

    /// Returns up to `max_results` normalized cafés near `center`.
    ///
    /// An empty `Vec` means neither radius produced a usable café.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SearchFailed`] when either lookup fails. The
    /// failed lookup is not retried.
    pub async fn search(&self, center: Coordinate) -> Result<Vec<NormalizedCafe>, SearchError> {
        let cafes = self.search_within(center, self.radii.narrow_m).await?;
        if !cafes.is_empty() {
            tracing::info!(count = cafes.len(), radius_m = self.radii.narrow_m, "cafes found");
            return Ok(cafes);
        }

        tracing::info!(
            narrow_m = self.radii.narrow_m,
            broad_m = self.radii.broad_m,
            "no cafes within narrow radius; broadening search"
        );
        let cafes = self.search_within(center, self.radii.broad_m).await?;
        if cafes.is_empty() {
            tracing::info!(radius_m = self.radii.broad_m, "no cafes found");
        } else {
            tracing::info!(count = cafes.len(), radius_m = self.radii.broad_m, "cafes found");
        }
        Ok(cafes)
    }

    async fn search_within(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<NormalizedCafe>, SearchError> {
        let query = PlacesQuery {
            center,
            radius_m,
            category: self.category.clone(),
        };
        let records = self
            .source
            .fetch_places(&query)
            .await
            .map_err(|source| SearchError::SearchFailed { radius_m, source })?;

        let mut cafes = normalize_places(records);
        cafes.truncate(self.max_results);
        Ok(cafes)
    }
}

/// Identifies one search started through a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Wraps a [`CafeSearch`] so that only the most recently started search
/// delivers its outcome; responses from superseded searches are dropped.
pub struct SearchSession<P> {
    search: CafeSearch<P>,
    generation: AtomicU64,
}

impl<P: PlacesSource> SearchSession<P> {
    pub fn new(search: CafeSearch<P>) -> Self {
        Self {
            search,
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new generation, invalidating every earlier ticket.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Runs a search and returns `Ok(None)` if another search started while
    /// this one was in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SearchFailed`] when the search fails and is
    /// still the current one. Errors from stale searches are dropped too.
    pub async fn search(
        &self,
        center: Coordinate,
    ) -> Result<Option<Vec<NormalizedCafe>>, SearchError> {
        let ticket = self.begin();
        let outcome = self.search.search(center).await;
        if !self.is_current(ticket) {
            tracing::warn!(ticket = ticket.0, "dropping stale search response");
            return Ok(None);
        }
        outcome.map(Some)
    }
}
