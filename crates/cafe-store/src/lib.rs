//! Local persistence for the café finder.
//!
//! A small string key-value abstraction ([`KvStore`]) with a file-backed and
//! an in-memory implementation, JSON helpers on top of it, and the
//! [`SavedList`] that keeps the user's liked cafés.

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod saved;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{read_json, write_json, KvStore};
pub use memory::MemoryStore;
pub use saved::{SaveOutcome, SavedList};

/// Key holding the last acquired coordinate and its timestamp.
pub const LOCATION_KEY: &str = "user_location";

/// Key holding the saved-café list.
pub const SAVED_CAFES_KEY: &str = "saved_cafes";

/// Key holding the most recent search result.
pub const LAST_RESULTS_KEY: &str = "last_results";
