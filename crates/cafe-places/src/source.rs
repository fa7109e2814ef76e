use std::future::Future;

use crate::error::PlacesError;
use crate::types::{PlaceRecord, PlacesQuery};

/// A places data source: given a center, radius and category, yields raw
/// records. [`OverpassClient`](crate::OverpassClient) is the production
/// implementation.
pub trait PlacesSource {
    /// Runs one lookup. A successful empty `Vec` means "nothing found".
    fn fetch_places(
        &self,
        query: &PlacesQuery,
    ) -> impl Future<Output = Result<Vec<PlaceRecord>, PlacesError>> + Send;
}
