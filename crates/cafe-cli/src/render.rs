//! Plain-text card rendering for search results and the saved list.

use std::fmt::Write as _;

use cafe_core::{NormalizedCafe, SavedCafe};

/// Renders one café as a small multi-line card.
pub(crate) fn format_card(position: usize, cafe: &NormalizedCafe) -> String {
    let mut card = format!("{position}. {} [{}]\n   {}\n", cafe.name, cafe.id, cafe.address);
    if let Some(hours) = cafe.opening_hours() {
        let _ = writeln!(card, "   hours:   {hours}");
    }
    if let Some(phone) = cafe.phone() {
        let _ = writeln!(card, "   phone:   {phone}");
    }
    if let Some(website) = cafe.website() {
        let _ = writeln!(card, "   website: {website}");
    }
    if let (Some(lat), Some(lon)) = (cafe.lat, cafe.lon) {
        let _ = writeln!(
            card,
            "   map:     https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=18/{lat}/{lon}"
        );
    }
    card
}

pub(crate) fn format_results(cafes: &[NormalizedCafe]) -> String {
    if cafes.is_empty() {
        return "No cafés found nearby. Try again later or from another spot.\n".to_owned();
    }
    cafes
        .iter()
        .enumerate()
        .map(|(i, cafe)| format_card(i + 1, cafe))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn format_saved(saved: &[SavedCafe]) -> String {
    if saved.is_empty() {
        return "No saved cafés yet.\n".to_owned();
    }
    saved
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut card = format_card(i + 1, &entry.cafe);
            let _ = writeln!(card, "   saved:   {}", entry.saved_at.format("%Y-%m-%d %H:%M UTC"));
            card
        })
        .collect::<Vec<_>>()
        .join("\n")
}
