//! IMDb ID normalization.

use crate::models::entry::Entry;

/// Prefix of canonical IMDb IDs.
const IMDB_PREFIX: &str = "tt";

/// Whether `value` is a canonical IMDb ID (`tt` followed by digits).
pub fn is_canonical_imdb_id(value: &str) -> bool {
    regex::Regex::new(r"^tt\d+$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Extract a canonical IMDb ID from an entry.
///
/// Checks `imdb_id`, then the entry's own `id` (some entries are keyed by
/// their IMDb ID), then a bare numeric `imdb_id`.
pub fn normalize_imdb_id(entry: &Entry) -> Option<String> {
    let imdb_id = entry.imdb_id.as_deref().map(str::trim).unwrap_or_default();
    if is_canonical_imdb_id(imdb_id) {
        return Some(imdb_id.to_string());
    }

    let item_id = entry.id.as_deref().map(str::trim).unwrap_or_default();
    if is_canonical_imdb_id(item_id) {
        return Some(item_id.to_string());
    }

    if !imdb_id.is_empty() && imdb_id.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("{}{}", IMDB_PREFIX, imdb_id));
    }

    None
}
