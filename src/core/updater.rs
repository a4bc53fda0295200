//! Applies a resolution to an entry's fields.

use super::posters::{PosterChoice, PosterPreferences};
use super::resolver::Resolution;
use crate::models::entry::Entry;
use crate::models::media::MediaType;
use crate::services::catalog::Catalog;
use crate::Result;

/// What applying a resolution did to an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// At least one field was written.
    pub changed: bool,
    /// The cascade found a catalog record.
    pub matched: bool,
}

/// Writes TMDB ID, posters and English title onto entries.
pub struct EntryUpdater<'a, C> {
    catalog: &'a C,
    preferences: PosterPreferences,
    image_base: String,
}

impl<'a, C: Catalog> EntryUpdater<'a, C> {
    pub fn new(catalog: &'a C, preferences: PosterPreferences, image_base: &str) -> Self {
        Self {
            catalog,
            preferences,
            image_base: image_base.to_string(),
        }
    }

    /// Move a legacy `original_title` into `title_en` and drop the legacy field.
    ///
    /// Runs before resolution so the migrated title is searchable, and again
    /// as the first step of [`apply`](Self::apply), where it is a no-op.
    pub fn migrate_legacy_title(&self, entry: &mut Entry) -> bool {
        let Some(legacy) = entry.original_title.take() else {
            return false;
        };
        if !legacy.is_empty() && entry.title_en.is_none() {
            entry.title_en = Some(legacy);
        }
        true
    }

    /// Apply a resolution. Idempotent: a second call with the same
    /// resolution reports `changed == false`.
    ///
    /// Field writes happen in a fixed order because later comparisons read
    /// fields written earlier in the same call.
    pub async fn apply(
        &self,
        entry: &mut Entry,
        resolution: &Resolution,
        media_type: MediaType,
    ) -> Result<ApplyOutcome> {
        let mut changed = self.migrate_legacy_title(entry);

        let Some(found) = resolution.as_match() else {
            return Ok(ApplyOutcome {
                changed,
                matched: false,
            });
        };
        let tmdb_id = found.tmdb_id();

        if entry.tmdb_id != Some(tmdb_id) {
            entry.tmdb_id = Some(tmdb_id);
            changed = true;
        }

        let posters = self.catalog.fetch_images(tmdb_id, media_type).await?;
        let choice = PosterChoice::pick(&posters, &self.preferences, &self.image_base);

        // poster = localized default, poster_en = English default
        if let Some(poster) = choice.localized.clone().or_else(|| choice.english.clone()) {
            changed |= set_if_changed(&mut entry.poster, poster);
        }
        if let Some(poster_en) = choice.english.clone() {
            changed |= set_if_changed(&mut entry.poster_en, poster_en);
        }
        if entry.poster_en.is_none() {
            if let Some(poster) = choice.localized {
                changed |= set_if_changed(&mut entry.poster_en, poster);
            }
        }

        match self.catalog.fetch_english_title(tmdb_id, media_type).await {
            Ok(Some(title_en)) => {
                changed |= set_if_changed(&mut entry.title_en, title_en);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("English title refresh failed for tmdb{}: {}", tmdb_id, e);
            }
        }

        Ok(ApplyOutcome {
            changed,
            matched: true,
        })
    }
}

fn set_if_changed(field: &mut Option<String>, value: String) -> bool {
    if field.as_deref() == Some(value.as_str()) {
        return false;
    }
    *field = Some(value);
    true
}
