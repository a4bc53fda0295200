//! Missing command implementation.
//!
//! Lists entries that have no TMDB ID yet.

use crate::core::store::RecordStore;
use crate::utils::fs::ensure_parent_dir;
use crate::Result;
use std::fs;
use std::path::Path;

/// One `[idx]\ttitle\timdb_id\tdouban_id` row per entry without a TMDB ID.
pub fn missing_rows(store: &RecordStore) -> Vec<String> {
    store
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.tmdb_id.is_none())
        .map(|(idx, entry)| {
            format!(
                "[{}]\t{}\t{}\t{}",
                store.position(idx),
                entry.label(),
                entry.imdb_id.as_deref().unwrap_or_default(),
                entry.douban_id.as_deref().unwrap_or_default()
            )
        })
        .collect()
}

/// Execute the missing command.
pub fn missing(file: &Path, output: &Path) -> Result<usize> {
    let store = RecordStore::load(file)?;
    let rows = missing_rows(&store);

    ensure_parent_dir(output)?;
    fs::write(output, rows.join("\n"))?;

    println!("No-tmdb_id items: {} -> {}", rows.len(), output.display());
    Ok(rows.len())
}
