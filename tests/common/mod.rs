//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::oneshot;
use watched_enricher::models::media::{CatalogHit, MediaType, PosterImage, PosterSet, SecondaryRecord};
use watched_enricher::services::Catalog;
use watched_enricher::{Error, Result};

/// In-memory catalog with a call log.
#[derive(Default)]
pub struct FakeCatalog {
    /// imdb id -> hit
    pub by_imdb: HashMap<String, CatalogHit>,
    /// douban id -> secondary record
    pub secondary: HashMap<String, SecondaryRecord>,
    /// (title, namespace, language) -> hit
    pub by_title: HashMap<(String, MediaType, String), CatalogHit>,
    /// (tmdb id, namespace) -> posters
    pub images: HashMap<(u64, MediaType), PosterSet>,
    /// tmdb id -> English title
    pub titles: HashMap<u64, String>,
    /// IMDb IDs whose lookup fails
    pub failing_imdb: HashSet<String>,
    /// Titles whose search fails
    pub failing_titles: HashSet<String>,
    /// TMDB IDs whose image fetch fails
    pub failing_images: HashSet<u64>,
    /// TMDB IDs whose title refresh fails
    pub failing_details: HashSet<u64>,
    /// Fired the first time the given title is searched
    pub signal_on: Mutex<Option<(String, oneshot::Sender<()>)>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_imdb(mut self, imdb_id: &str, tmdb_id: u64, media_type: MediaType) -> Self {
        self.by_imdb
            .insert(imdb_id.to_string(), CatalogHit::new(tmdb_id, media_type));
        self
    }

    pub fn with_secondary(mut self, douban_id: &str, title: Option<&str>, year: Option<&str>) -> Self {
        self.secondary.insert(
            douban_id.to_string(),
            SecondaryRecord {
                title: title.map(str::to_string),
                year: year.map(str::to_string),
            },
        );
        self
    }

    pub fn with_title(
        mut self,
        title: &str,
        media_type: MediaType,
        language: &str,
        tmdb_id: u64,
    ) -> Self {
        self.by_title.insert(
            (title.to_string(), media_type, language.to_string()),
            CatalogHit::new(tmdb_id, media_type).with_title(title),
        );
        self
    }

    pub fn with_images(mut self, tmdb_id: u64, media_type: MediaType, posters: Vec<PosterImage>) -> Self {
        self.images.insert((tmdb_id, media_type), PosterSet::new(posters));
        self
    }

    pub fn with_english_title(mut self, tmdb_id: u64, title: &str) -> Self {
        self.titles.insert(tmdb_id, title.to_string());
        self
    }

    pub fn failing_title(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    pub fn failing_imdb(mut self, imdb_id: &str) -> Self {
        self.failing_imdb.insert(imdb_id.to_string());
        self
    }

    /// Send on `sender` when `title` is first searched.
    pub fn signal_on_search(self, title: &str, sender: oneshot::Sender<()>) -> Self {
        *self.signal_on.lock().unwrap() = Some((title.to_string(), sender));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Catalog for FakeCatalog {
    async fn find_by_external_id(
        &self,
        imdb_id: &str,
        _prefer: MediaType,
    ) -> Result<Option<CatalogHit>> {
        self.log(format!("find {}", imdb_id));
        if self.failing_imdb.contains(imdb_id) {
            return Err(Error::other("find failed"));
        }
        Ok(self.by_imdb.get(imdb_id).cloned())
    }

    async fn lookup_secondary(&self, douban_id: &str) -> Option<SecondaryRecord> {
        self.log(format!("douban {}", douban_id));
        self.secondary.get(douban_id).cloned()
    }

    async fn search_by_title(
        &self,
        title: &str,
        prefer: MediaType,
        year: Option<&str>,
        language: Option<&str>,
    ) -> Result<Option<CatalogHit>> {
        let language = language.unwrap_or_default();
        self.log(format!(
            "search {} {} {} {}",
            prefer,
            title,
            year.unwrap_or("-"),
            language
        ));
        let mut signal = self.signal_on.lock().unwrap();
        if signal.as_ref().is_some_and(|(t, _)| t == title) {
            if let Some((_, sender)) = signal.take() {
                let _ = sender.send(());
            }
        }
        drop(signal);
        if self.failing_titles.contains(title) {
            return Err(Error::other("search failed"));
        }
        Ok(self
            .by_title
            .get(&(title.to_string(), prefer, language.to_string()))
            .cloned())
    }

    async fn fetch_images(&self, tmdb_id: u64, media_type: MediaType) -> Result<PosterSet> {
        self.log(format!("images {} {}", media_type, tmdb_id));
        if self.failing_images.contains(&tmdb_id) {
            return Err(Error::other("images failed"));
        }
        Ok(self
            .images
            .get(&(tmdb_id, media_type))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_english_title(
        &self,
        tmdb_id: u64,
        media_type: MediaType,
    ) -> Result<Option<String>> {
        self.log(format!("details {} {}", media_type, tmdb_id));
        if self.failing_details.contains(&tmdb_id) {
            return Err(Error::other("details failed"));
        }
        Ok(self.titles.get(&tmdb_id).cloned())
    }
}
