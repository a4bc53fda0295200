//! Catalog-related data models.

use serde::Deserialize;

/// Catalog namespace a title lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// The other namespace.
    pub fn opposite(self) -> Self {
        match self {
            MediaType::Movie => MediaType::Tv,
            MediaType::Tv => MediaType::Movie,
        }
    }

    /// Path segment used by the TMDB API.
    pub fn as_path(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// A catalog record that an entry resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogHit {
    /// TMDB ID.
    pub tmdb_id: u64,
    /// Namespace the record was found in.
    pub media_type: MediaType,
    /// Title as returned by the catalog, if any.
    pub title: Option<String>,
}

impl CatalogHit {
    pub fn new(tmdb_id: u64, media_type: MediaType) -> Self {
        Self {
            tmdb_id,
            media_type,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Title/year pair from the secondary (Douban) provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryRecord {
    pub title: Option<String>,
    pub year: Option<String>,
}

/// A single poster candidate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PosterImage {
    /// ISO 639-1 language tag, `None` for untagged artwork.
    pub iso_639_1: Option<String>,
    /// Popularity.
    pub vote_count: Option<u64>,
    /// Quality.
    pub vote_average: Option<f64>,
    /// Image path relative to the image base URL.
    pub file_path: Option<String>,
}

impl PosterImage {
    pub fn new(lang: Option<&str>, vote_count: u64, vote_average: f64, file_path: &str) -> Self {
        Self {
            iso_639_1: lang.map(str::to_string),
            vote_count: Some(vote_count),
            vote_average: Some(vote_average),
            file_path: Some(file_path.to_string()),
        }
    }
}

/// Poster candidates for one title.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PosterSet {
    #[serde(default)]
    pub posters: Vec<PosterImage>,
}

impl PosterSet {
    pub fn new(posters: Vec<PosterImage>) -> Self {
        Self { posters }
    }

    pub fn is_empty(&self) -> bool {
        self.posters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(MediaType::Movie.opposite(), MediaType::Tv);
        assert_eq!(MediaType::Tv.opposite(), MediaType::Movie);
    }

    #[test]
    fn test_poster_set_deserialize_untagged() {
        let json = r#"{"id": 278, "posters": [
            {"iso_639_1": null, "vote_count": 3, "vote_average": 5.2, "file_path": "/a.jpg"},
            {"iso_639_1": "zh", "vote_count": 1, "vote_average": 5.0, "file_path": "/b.jpg", "width": 500}
        ]}"#;
        let set: PosterSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.posters.len(), 2);
        assert_eq!(set.posters[0].iso_639_1, None);
        assert_eq!(set.posters[1].iso_639_1.as_deref(), Some("zh"));
    }
}
