//! Reduces raw place records to [`NormalizedCafe`]s.

use std::collections::HashSet;

use cafe_core::{NormalizedCafe, ADDRESS_NOT_AVAILABLE};

use crate::types::PlaceRecord;

/// Normalizes a batch of raw records.
///
/// Records without a usable `name` tag are dropped, as is every record whose
/// id was already seen earlier in `records`. Output order follows input order.
#[must_use]
pub fn normalize_places(records: Vec<PlaceRecord>) -> Vec<NormalizedCafe> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut cafes = Vec::with_capacity(records.len());

    for record in records {
        let Some(name) = record_name(&record) else {
            tracing::debug!(id = %record.id, "dropping place without a name");
            continue;
        };
        if !seen.insert(record.id.clone()) {
            tracing::debug!(id = %record.id, name, "dropping duplicate place id");
            continue;
        }

        let name = name.to_owned();
        let address = display_address(&record);
        let (lat, lon) = record.position();
        cafes.push(NormalizedCafe {
            id: record.id,
            name,
            address,
            tags: record.tags,
            lat,
            lon,
        });
    }

    cafes
}

fn record_name(record: &PlaceRecord) -> Option<&str> {
    record
        .tags
        .get("name")
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
}

/// Builds `"<housenumber> <street>, <city>"` from whichever address tags are
/// present, or [`ADDRESS_NOT_AVAILABLE`] when none are.
#[must_use]
pub fn display_address(record: &PlaceRecord) -> String {
    let tag = |key: &str| {
        record
            .tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };

    let street_line = [tag("addr:housenumber"), tag("addr:street")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let parts: Vec<&str> = [Some(street_line.as_str()), tag("addr:city")]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        ADDRESS_NOT_AVAILABLE.to_owned()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
