pub mod client;
pub mod error;
pub mod normalize;
pub mod search;
pub mod source;
pub mod types;

pub use client::OverpassClient;
pub use error::{PlacesError, SearchError};
pub use normalize::{display_address, normalize_places};
pub use search::{CafeSearch, SearchRadii, SearchSession, SearchTicket};
pub use source::PlacesSource;
pub use types::{Category, Center, OverpassResponse, PlaceRecord, PlacesQuery};
