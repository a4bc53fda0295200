//! Resolution cascade.
//!
//! Decides which TMDB record, if any, a watched entry corresponds to.
//! Strategies run in order and the first hit wins:
//!
//! 1. **IMDb**: cross-reference lookup by the normalized IMDb ID
//! 2. **Douban**: search by the title/year the secondary provider reports
//! 3. **Title**: search by the entry's own titles with the classification hint
//! 4. **Cross-type**: the same title search in the opposite namespace
//!
//! Catalog errors never abort the cascade. They are written to the optional
//! match diagnostics log and the next strategy (or candidate) is tried.

use super::diagnostics::DiagnosticLog;
use super::normalizer::normalize_imdb_id;
use crate::models::entry::Entry;
use crate::models::media::{CatalogHit, MediaType};
use crate::services::catalog::{Catalog, ENGLISH_LANGUAGE};
use crate::Result;

/// Strategy that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ImdbId,
    DoubanTitle,
    Title,
    CrossType,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::ImdbId => write!(f, "imdb"),
            MatchStrategy::DoubanTitle => write!(f, "douban"),
            MatchStrategy::Title => write!(f, "title"),
            MatchStrategy::CrossType => write!(f, "cross-type"),
        }
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub hit: CatalogHit,
    pub strategy: MatchStrategy,
}

impl Match {
    pub fn tmdb_id(&self) -> u64 {
        self.hit.tmdb_id
    }
}

/// Outcome of the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(Match),
    NoMatch,
}

impl Resolution {
    pub fn as_match(&self) -> Option<&Match> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::NoMatch => None,
        }
    }

    pub fn tmdb_id(&self) -> Option<u64> {
        self.as_match().map(Match::tmdb_id)
    }
}

/// Read-only view of an entry, as the cascade sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub imdb_id: Option<String>,
    pub douban_id: Option<String>,
    /// Entry title used when the secondary record carries none.
    pub title: Option<String>,
    pub title_candidates: Vec<String>,
    pub hint: MediaType,
    pub label: String,
}

impl ResolutionRequest {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            imdb_id: normalize_imdb_id(entry),
            douban_id: entry
                .douban_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            title: entry.title.as_deref().map(|t| t.trim().to_string()),
            title_candidates: entry.title_candidates(),
            hint: entry.media_type_hint(),
            label: entry.label(),
        }
    }
}

/// Runs the cascade against a catalog.
pub struct Resolver<'a, C> {
    catalog: &'a C,
    language: String,
    debug_log: Option<&'a DiagnosticLog>,
}

impl<'a, C: Catalog> Resolver<'a, C> {
    /// `language` is the local search language, e.g. `zh-CN`.
    pub fn new(catalog: &'a C, language: &str) -> Self {
        Self {
            catalog,
            language: language.to_string(),
            debug_log: None,
        }
    }

    /// Record lookup errors to a diagnostics log.
    pub fn with_debug_log(mut self, log: Option<&'a DiagnosticLog>) -> Self {
        self.debug_log = log;
        self
    }

    /// Resolve an entry. Returns the resolution and the classification in
    /// effect afterwards, which differs from the hint after a cross-type hit.
    pub async fn resolve(&self, entry: &Entry) -> (Resolution, MediaType) {
        let request = ResolutionRequest::from_entry(entry);
        self.resolve_request(&request).await
    }

    pub async fn resolve_request(&self, request: &ResolutionRequest) -> (Resolution, MediaType) {
        let prefer = request.hint;

        if let Some(hit) = self.match_imdb(request).await {
            return matched(hit, MatchStrategy::ImdbId);
        }

        if let Some(hit) = self.match_douban(request).await {
            return matched(hit, MatchStrategy::DoubanTitle);
        }

        if let Some(hit) = self.match_titles(request, prefer).await {
            return matched(hit, MatchStrategy::Title);
        }

        if !request.title_candidates.is_empty() {
            let alt = prefer.opposite();
            if let Some(hit) = self.match_titles(request, alt).await {
                tracing::debug!("Cross-type match for {} as {}", request.label, alt);
                return matched(hit, MatchStrategy::CrossType);
            }
        }

        tracing::debug!("No TMDB match for {}", request.label);
        (Resolution::NoMatch, prefer)
    }

    async fn match_imdb(&self, request: &ResolutionRequest) -> Option<CatalogHit> {
        let imdb_id = request.imdb_id.as_deref()?;
        match self.catalog.find_by_external_id(imdb_id, request.hint).await {
            Ok(hit) => {
                tracing::debug!("IMDb lookup {} -> {:?}", imdb_id, hit.as_ref().map(|h| h.tmdb_id));
                hit
            }
            Err(e) => {
                self.record(&format!("IMDB_ERROR\t{}\t{}\t{}", imdb_id, request.label, e));
                None
            }
        }
    }

    async fn match_douban(&self, request: &ResolutionRequest) -> Option<CatalogHit> {
        let douban_id = request.douban_id.as_deref()?;
        let info = self.catalog.lookup_secondary(douban_id).await?;

        let title = info
            .title
            .or_else(|| request.title.clone())
            .unwrap_or_default();
        let year = info.year.as_deref();

        match self.search_both_languages(&title, request.hint, year).await {
            Ok(hit) => hit,
            Err(e) => {
                self.record(&format!("TITLE_ERROR\t{}\t{}\t{}", title, request.label, e));
                None
            }
        }
    }

    async fn match_titles(
        &self,
        request: &ResolutionRequest,
        media_type: MediaType,
    ) -> Option<CatalogHit> {
        for candidate in &request.title_candidates {
            match self.search_both_languages(candidate, media_type, None).await {
                Ok(Some(hit)) => return Some(hit),
                Ok(None) => {}
                Err(e) => {
                    self.record(&format!(
                        "TITLE_ERROR\t{}\t{}\t{}",
                        candidate, request.label, e
                    ));
                }
            }
        }
        None
    }

    /// Search in the local language, then in English.
    async fn search_both_languages(
        &self,
        title: &str,
        media_type: MediaType,
        year: Option<&str>,
    ) -> Result<Option<CatalogHit>> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        for language in [self.language.as_str(), ENGLISH_LANGUAGE] {
            let hit = self
                .catalog
                .search_by_title(title, media_type, year, Some(language))
                .await?;
            if hit.is_some() {
                return Ok(hit);
            }
        }
        Ok(None)
    }

    fn record(&self, line: &str) {
        tracing::debug!("{}", line);
        if let Some(log) = self.debug_log {
            log.record(line);
        }
    }
}

/// The hit's namespace becomes the effective classification.
fn matched(hit: CatalogHit, strategy: MatchStrategy) -> (Resolution, MediaType) {
    let media_type = hit.media_type;
    (Resolution::Matched(Match { hit, strategy }), media_type)
}
