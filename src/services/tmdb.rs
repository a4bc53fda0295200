//! TMDB API client.

use crate::models::config::TmdbSettings;
use crate::models::media::{MediaType, PosterSet};
use crate::Result;
use serde::Deserialize;
use std::time::Duration;

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
    pub api_base: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    /// Create config from settings and an already-resolved token.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(settings: &TmdbSettings, token: &str) -> Result<Self> {
        let api_key = token.trim().to_string();
        if api_key.is_empty() {
            return Err(crate::Error::TmdbTokenMissing);
        }

        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Ok(Self {
            api_key,
            use_bearer,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout),
        })
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// Cross-reference lookup result.
#[derive(Debug, Default, Deserialize)]
pub struct FindResult {
    #[serde(default)]
    pub movie_results: Vec<MovieSearchItem>,
    #[serde(default)]
    pub tv_results: Vec<TvSearchItem>,
}

/// Movie search result.
#[derive(Debug, Deserialize)]
pub struct MovieSearchResult {
    #[serde(default)]
    pub results: Vec<MovieSearchItem>,
}

/// Movie search item.
#[derive(Debug, Deserialize)]
pub struct MovieSearchItem {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
}

/// TV show search result.
#[derive(Debug, Deserialize)]
pub struct TvSearchResult {
    #[serde(default)]
    pub results: Vec<TvSearchItem>,
}

/// TV show search item.
#[derive(Debug, Deserialize)]
pub struct TvSearchItem {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
}

/// Title fields shared by movie and TV details.
#[derive(Debug, Default, Deserialize)]
pub struct TitleDetails {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
}

impl TitleDetails {
    /// Display title, whichever namespace the record came from.
    pub fn best_title(self) -> Option<String> {
        [self.title, self.name, self.original_title, self.original_name]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Build a request with proper authentication.
    fn build_request(&self, path: &str, params: &[(&str, &str)]) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.config.api_base, path.trim_start_matches('/'));
        let request = self
            .client
            .get(url)
            .header("accept", "application/json")
            .query(params);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request.query(&[("api_key", self.config.api_key.as_str())])
        }
    }

    /// Send a GET request and decode the JSON body. Non-2xx statuses are errors,
    /// 404 as [`crate::Error::NotFound`].
    async fn get_json<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let resp = self.build_request(path, params).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(crate::Error::NotFound(path.to_string()));
        }
        Ok(resp.error_for_status()?.json().await?)
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let resp = self.build_request("authentication", &[]).send().await?;
        Ok(resp.status().is_success())
    }

    /// Look up movies and shows by IMDb ID.
    pub async fn find_by_imdb(&self, imdb_id: &str) -> Result<FindResult> {
        self.get_json(
            &format!("find/{}", imdb_id),
            &[("external_source", "imdb_id")],
        )
        .await
    }

    /// Search for movies.
    pub async fn search_movie(
        &self,
        query: &str,
        year: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<MovieSearchItem>> {
        let mut params = vec![("query", query), ("include_adult", "false")];
        if let Some(language) = language {
            params.push(("language", language));
        }
        if let Some(year) = year {
            params.push(("year", year));
        }
        let resp: MovieSearchResult = self.get_json("search/movie", &params).await?;
        Ok(resp.results)
    }

    /// Search for TV shows.
    pub async fn search_tv(
        &self,
        query: &str,
        year: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<TvSearchItem>> {
        let mut params = vec![("query", query), ("include_adult", "false")];
        if let Some(language) = language {
            params.push(("language", language));
        }
        if let Some(year) = year {
            params.push(("first_air_date_year", year));
        }
        let resp: TvSearchResult = self.get_json("search/tv", &params).await?;
        Ok(resp.results)
    }

    /// Get poster candidates for a movie or show.
    pub async fn get_images(
        &self,
        id: u64,
        media_type: MediaType,
        image_languages: &str,
    ) -> Result<PosterSet> {
        self.get_json(
            &format!("{}/{}/images", media_type.as_path(), id),
            &[("include_image_language", image_languages)],
        )
        .await
    }

    /// Get movie or show details in the given language.
    pub async fn get_details(
        &self,
        id: u64,
        media_type: MediaType,
        language: &str,
    ) -> Result<TitleDetails> {
        self.get_json(
            &format!("{}/{}", media_type.as_path(), id),
            &[("language", language)],
        )
        .await
    }
}
