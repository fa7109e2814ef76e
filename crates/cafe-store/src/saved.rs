//! The user's saved-café list.

use cafe_core::{NormalizedCafe, SavedCafe};
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::kv::{read_json, write_json, KvStore};
use crate::SAVED_CAFES_KEY;

/// Result of a [`SavedList::save`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The café was appended and persisted.
    Saved,
    /// A café with the same id was already present; nothing changed.
    AlreadySaved,
}

/// Flat, insertion-ordered list of saved cafés, unique by id, persisted
/// under [`SAVED_CAFES_KEY`].
#[derive(Debug, Clone)]
pub struct SavedList<S> {
    store: S,
}

impl<S: KvStore> SavedList<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every saved café in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be read or is malformed.
    pub fn list(&self) -> Result<Vec<SavedCafe>, StoreError> {
        Ok(read_json(&self.store, SAVED_CAFES_KEY)?.unwrap_or_default())
    }

    /// Returns `true` when a café with `id` is saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be read.
    pub fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|saved| saved.id() == id))
    }

    /// Appends `cafe` unless its id is already present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be read or written.
    pub fn save(&self, cafe: NormalizedCafe) -> Result<SaveOutcome, StoreError> {
        self.save_at(cafe, Utc::now())
    }

    /// [`save`](Self::save) with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be read or written.
    pub fn save_at(
        &self,
        cafe: NormalizedCafe,
        saved_at: DateTime<Utc>,
    ) -> Result<SaveOutcome, StoreError> {
        let mut saved = self.list()?;
        if saved.iter().any(|existing| existing.id() == cafe.id) {
            tracing::info!(id = %cafe.id, name = %cafe.name, "cafe already saved");
            return Ok(SaveOutcome::AlreadySaved);
        }

        tracing::info!(id = %cafe.id, name = %cafe.name, "saving cafe");
        saved.push(SavedCafe::new(cafe, saved_at));
        write_json(&self.store, SAVED_CAFES_KEY, &saved)?;
        Ok(SaveOutcome::Saved)
    }

    /// Removes the café with `id`. Returns `false` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be read or written.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut saved = self.list()?;
        let before = saved.len();
        saved.retain(|entry| entry.id() != id);
        if saved.len() == before {
            return Ok(false);
        }

        write_json(&self.store, SAVED_CAFES_KEY, &saved)?;
        tracing::info!(id, remaining = saved.len(), "removed saved cafe");
        Ok(true)
    }
}
