//! Catalog seam used by the resolver and the updater.
//!
//! [`CatalogClient`] backs it with TMDB for everything and Douban for the
//! secondary lookup. None of the operations retry internally.

use super::douban::DoubanClient;
use super::tmdb::{FindResult, TmdbClient};
use crate::models::media::{CatalogHit, MediaType, PosterSet, SecondaryRecord};
use crate::Result;
use std::future::Future;

/// Language used for English searches and title refreshes.
pub const ENGLISH_LANGUAGE: &str = "en-US";

/// Operations the resolution cascade needs from a metadata provider.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Cross-reference lookup by IMDb ID. Prefers a hit in `prefer`.
    async fn find_by_external_id(&self, imdb_id: &str, prefer: MediaType)
        -> Result<Option<CatalogHit>>;

    /// Best-effort lookup on the secondary provider. Never fails.
    async fn lookup_secondary(&self, douban_id: &str) -> Option<SecondaryRecord>;

    /// Free-text search in one namespace. Only the top result is returned.
    async fn search_by_title(
        &self,
        title: &str,
        prefer: MediaType,
        year: Option<&str>,
        language: Option<&str>,
    ) -> Result<Option<CatalogHit>>;

    /// Poster candidates, retrying the opposite namespace on 404.
    async fn fetch_images(&self, tmdb_id: u64, media_type: MediaType) -> Result<PosterSet>;

    /// Canonical English title.
    async fn fetch_english_title(&self, tmdb_id: u64, media_type: MediaType)
        -> Result<Option<String>>;
}

/// TMDB + Douban implementation of [`Catalog`].
pub struct CatalogClient {
    tmdb: TmdbClient,
    douban: DoubanClient,
    image_languages: String,
}

impl CatalogClient {
    /// `language` is the local language, e.g. `zh-CN`.
    pub fn new(tmdb: TmdbClient, douban: DoubanClient, language: &str) -> Self {
        let primary = language.split('-').next().unwrap_or(language);
        Self {
            tmdb,
            douban,
            image_languages: format!("{},en,null", primary),
        }
    }

    pub fn tmdb(&self) -> &TmdbClient {
        &self.tmdb
    }
}

/// Pick the top hit of the preferred namespace, else of the other one.
fn pick_find_hit(find: FindResult, prefer: MediaType) -> Option<CatalogHit> {
    let movie = find.movie_results.into_iter().next().map(|m| {
        let hit = CatalogHit::new(m.id, MediaType::Movie);
        match m.title.or(m.original_title) {
            Some(title) => hit.with_title(title),
            None => hit,
        }
    });
    let tv = find.tv_results.into_iter().next().map(|t| {
        let hit = CatalogHit::new(t.id, MediaType::Tv);
        match t.name.or(t.original_name) {
            Some(title) => hit.with_title(title),
            None => hit,
        }
    });
    match prefer {
        MediaType::Movie => movie.or(tv),
        MediaType::Tv => tv.or(movie),
    }
}

/// Fetch images in `media_type`, retrying once in the other namespace on 404.
/// A second 404 means the record has no artwork.
async fn images_with_fallback<F, Fut>(
    tmdb_id: u64,
    media_type: MediaType,
    fetch: F,
) -> Result<PosterSet>
where
    F: Fn(MediaType) -> Fut,
    Fut: Future<Output = Result<PosterSet>>,
{
    match fetch(media_type).await {
        Err(e) if e.is_not_found() => {
            let alt = media_type.opposite();
            tracing::debug!(
                "No {} images for tmdb{}, retrying as {}",
                media_type,
                tmdb_id,
                alt
            );
            match fetch(alt).await {
                Err(e) if e.is_not_found() => Ok(PosterSet::default()),
                other => other,
            }
        }
        other => other,
    }
}

impl Catalog for CatalogClient {
    async fn find_by_external_id(
        &self,
        imdb_id: &str,
        prefer: MediaType,
    ) -> Result<Option<CatalogHit>> {
        let find = self.tmdb.find_by_imdb(imdb_id).await?;
        Ok(pick_find_hit(find, prefer))
    }

    async fn lookup_secondary(&self, douban_id: &str) -> Option<SecondaryRecord> {
        self.douban.lookup(douban_id).await
    }

    async fn search_by_title(
        &self,
        title: &str,
        prefer: MediaType,
        year: Option<&str>,
        language: Option<&str>,
    ) -> Result<Option<CatalogHit>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let hit = match prefer {
            MediaType::Movie => self
                .tmdb
                .search_movie(title, year, language)
                .await?
                .into_iter()
                .next()
                .map(|m| {
                    let hit = CatalogHit::new(m.id, MediaType::Movie);
                    match m.title {
                        Some(t) => hit.with_title(t),
                        None => hit,
                    }
                }),
            MediaType::Tv => self
                .tmdb
                .search_tv(title, year, language)
                .await?
                .into_iter()
                .next()
                .map(|t| {
                    let hit = CatalogHit::new(t.id, MediaType::Tv);
                    match t.name {
                        Some(n) => hit.with_title(n),
                        None => hit,
                    }
                }),
        };
        Ok(hit)
    }

    async fn fetch_images(&self, tmdb_id: u64, media_type: MediaType) -> Result<PosterSet> {
        images_with_fallback(tmdb_id, media_type, |kind| {
            self.tmdb.get_images(tmdb_id, kind, &self.image_languages)
        })
        .await
    }

    async fn fetch_english_title(
        &self,
        tmdb_id: u64,
        media_type: MediaType,
    ) -> Result<Option<String>> {
        let details = self
            .tmdb
            .get_details(tmdb_id, media_type, ENGLISH_LANGUAGE)
            .await?;
        Ok(details.best_title())
    }
}
