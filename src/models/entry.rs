//! Watched-list entry model.

use super::media::MediaType;

/// Field names used in the record file.
pub mod keys {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const TITLE_EN: &str = "title_en";
    pub const ORIGINAL_TITLE: &str = "original_title";
    pub const IMDB_ID: &str = "imdb_id";
    pub const DOUBAN_ID: &str = "douban_id";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const TMDB_ID: &str = "tmdb_id";
    pub const POSTER: &str = "poster";
    pub const POSTER_EN: &str = "poster_en";
}

/// Content types that live in the TV namespace. Anything else is a movie.
const TV_CONTENT_TYPES: &[&str] = &["tvshow", "tv_series", "tv", "series", "variety"];

/// A scalar value to be written back to the record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Int(u64),
}

/// One watched item.
///
/// Empty strings in the file are read as `None`. The legacy
/// `original_title` field keeps an empty string so its presence is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub original_title: Option<String>,
    pub imdb_id: Option<String>,
    pub douban_id: Option<String>,
    pub content_type: Option<String>,
    pub tmdb_id: Option<u64>,
    pub poster: Option<String>,
    pub poster_en: Option<String>,
}

impl Entry {
    /// Build an entry from a scalar lookup on the underlying mapping.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).and_then(non_empty);
        Self {
            id: text(keys::ID),
            title: text(keys::TITLE),
            title_en: text(keys::TITLE_EN),
            original_title: lookup(keys::ORIGINAL_TITLE).map(|v| v.trim().to_string()),
            imdb_id: text(keys::IMDB_ID),
            douban_id: text(keys::DOUBAN_ID),
            content_type: text(keys::CONTENT_TYPE),
            tmdb_id: text(keys::TMDB_ID).and_then(|v| v.parse().ok()),
            poster: text(keys::POSTER),
            poster_en: text(keys::POSTER_EN),
        }
    }

    /// All known fields with their current value, in file-key form.
    pub fn fields(&self) -> Vec<(&'static str, Option<FieldValue>)> {
        let s = |v: &Option<String>| v.clone().map(FieldValue::Str);
        vec![
            (keys::ID, s(&self.id)),
            (keys::TITLE, s(&self.title)),
            (keys::TITLE_EN, s(&self.title_en)),
            (keys::ORIGINAL_TITLE, s(&self.original_title)),
            (keys::IMDB_ID, s(&self.imdb_id)),
            (keys::DOUBAN_ID, s(&self.douban_id)),
            (keys::CONTENT_TYPE, s(&self.content_type)),
            (keys::TMDB_ID, self.tmdb_id.map(FieldValue::Int)),
            (keys::POSTER, s(&self.poster)),
            (keys::POSTER_EN, s(&self.poster_en)),
        ]
    }

    /// Classification hint from the free-form content type.
    pub fn media_type_hint(&self) -> MediaType {
        let ctype = self
            .content_type
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if TV_CONTENT_TYPES.contains(&ctype.as_str()) {
            MediaType::Tv
        } else {
            MediaType::Movie
        }
    }

    /// Ordered, deduplicated titles to search with.
    pub fn title_candidates(&self) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for title in [&self.title, &self.title_en].into_iter().flatten() {
            let title = title.trim();
            if !title.is_empty() && !candidates.iter().any(|c| c == title) {
                candidates.push(title.to_string());
            }
        }
        candidates
    }

    /// Name shown in progress lines and logs.
    pub fn label(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_default()
    }

    /// Whether every enrichment field is already filled in.
    pub fn is_complete(&self) -> bool {
        self.tmdb_id.is_some()
            && self.poster.is_some()
            && self.poster_en.is_some()
            && self.title_en.is_some()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_type(ctype: Option<&str>) -> Entry {
        Entry {
            content_type: ctype.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_media_type_hint() {
        assert_eq!(entry_with_type(Some("TV")).media_type_hint(), MediaType::Tv);
        assert_eq!(entry_with_type(Some("variety")).media_type_hint(), MediaType::Tv);
        assert_eq!(entry_with_type(Some("tv_series")).media_type_hint(), MediaType::Tv);
        assert_eq!(entry_with_type(Some("Series")).media_type_hint(), MediaType::Tv);
        assert_eq!(entry_with_type(Some("movie")).media_type_hint(), MediaType::Movie);
        // Unknown types fall back to movie
        assert_eq!(entry_with_type(Some("anime")).media_type_hint(), MediaType::Movie);
        assert_eq!(entry_with_type(None).media_type_hint(), MediaType::Movie);
    }

    #[test]
    fn test_title_candidates_dedup() {
        let entry = Entry {
            title: Some("Alien".to_string()),
            title_en: Some(" Alien ".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.title_candidates(), vec!["Alien".to_string()]);

        let entry = Entry {
            title: Some("异形".to_string()),
            title_en: Some("Alien".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.title_candidates(), vec!["异形", "Alien"]);

        assert!(Entry::default().title_candidates().is_empty());
    }

    #[test]
    fn test_from_lookup_treats_empty_as_missing() {
        let entry = Entry::from_lookup(|key| match key {
            "title" => Some("肖申克的救赎".to_string()),
            "title_en" => Some("".to_string()),
            "original_title" => Some("".to_string()),
            "tmdb_id" => Some("278".to_string()),
            _ => None,
        });
        assert_eq!(entry.title.as_deref(), Some("肖申克的救赎"));
        assert_eq!(entry.title_en, None);
        assert_eq!(entry.original_title.as_deref(), Some(""));
        assert_eq!(entry.tmdb_id, Some(278));
    }

    #[test]
    fn test_is_complete() {
        let mut entry = Entry {
            tmdb_id: Some(278),
            poster: Some("p".to_string()),
            poster_en: Some("e".to_string()),
            ..Default::default()
        };
        assert!(!entry.is_complete());
        entry.title_en = Some("The Shawshank Redemption".to_string());
        assert!(entry.is_complete());
    }
}
