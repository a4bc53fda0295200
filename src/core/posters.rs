//! Poster selection.

use crate::models::media::{PosterImage, PosterSet};
use std::cmp::Ordering;

/// One step of a poster language waterfall. `None` matches untagged artwork.
pub type LanguagePreference = Option<String>;

/// Poster language orders for the localized and English poster fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterPreferences {
    pub localized: Vec<LanguagePreference>,
    pub english: Vec<LanguagePreference>,
}

impl PosterPreferences {
    /// Build the waterfalls from a local language such as `zh-CN`:
    /// `[zh, zh-CN, untagged]` and `[en, untagged]`.
    pub fn for_language(language: &str) -> Self {
        let primary = language.split('-').next().unwrap_or(language);
        let mut localized = vec![Some(primary.to_string())];
        if primary != language {
            localized.push(Some(language.to_string()));
        }
        localized.push(None);

        Self {
            localized,
            english: vec![Some("en".to_string()), None],
        }
    }
}

/// Localized and English poster URLs picked from a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosterChoice {
    pub localized: Option<String>,
    pub english: Option<String>,
}

impl PosterChoice {
    /// Pick both posters and prefix the chosen paths with `image_base`.
    pub fn pick(set: &PosterSet, prefs: &PosterPreferences, image_base: &str) -> Self {
        let url = |path: String| format!("{}{}", image_base, path);
        Self {
            localized: select_poster(set, &prefs.localized).map(url),
            english: select_poster(set, &prefs.english).map(url),
        }
    }
}

/// Return the file path of the best poster for the first preference that
/// has any candidate. Never merges candidates across languages.
pub fn select_poster(set: &PosterSet, preferences: &[LanguagePreference]) -> Option<String> {
    for preference in preferences {
        let mut candidates: Vec<&PosterImage> = set
            .posters
            .iter()
            .filter(|p| p.file_path.is_some() && p.iso_639_1 == *preference)
            .collect();
        if candidates.is_empty() {
            continue;
        }
        candidates.sort_by(|a, b| rank(b, a));
        return candidates[0].file_path.clone();
    }
    None
}

/// Popularity first, then quality.
fn rank(a: &PosterImage, b: &PosterImage) -> Ordering {
    let count = |p: &PosterImage| p.vote_count.unwrap_or(0);
    let average = |p: &PosterImage| p.vote_average.unwrap_or(0.0);
    count(a)
        .cmp(&count(b))
        .then_with(|| average(a).partial_cmp(&average(b)).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> PosterPreferences {
        PosterPreferences::for_language("zh-CN")
    }

    #[test]
    fn test_default_orders() {
        let prefs = prefs();
        assert_eq!(
            prefs.localized,
            vec![Some("zh".to_string()), Some("zh-CN".to_string()), None]
        );
        assert_eq!(prefs.english, vec![Some("en".to_string()), None]);

        let prefs = PosterPreferences::for_language("ja");
        assert_eq!(prefs.localized, vec![Some("ja".to_string()), None]);
    }

    #[test]
    fn test_most_popular_wins() {
        let set = PosterSet::new(vec![
            PosterImage::new(Some("zh"), 5, 9.0, "/five.jpg"),
            PosterImage::new(Some("zh"), 10, 1.0, "/ten.jpg"),
        ]);
        assert_eq!(select_poster(&set, &prefs().localized).as_deref(), Some("/ten.jpg"));
    }

    #[test]
    fn test_quality_breaks_ties() {
        let set = PosterSet::new(vec![
            PosterImage::new(Some("en"), 4, 5.1, "/low.jpg"),
            PosterImage::new(Some("en"), 4, 5.6, "/high.jpg"),
        ]);
        assert_eq!(select_poster(&set, &prefs().english).as_deref(), Some("/high.jpg"));
    }

    #[test]
    fn test_waterfall_does_not_merge_languages() {
        // A popular untagged poster never beats a matching language
        let set = PosterSet::new(vec![
            PosterImage::new(None, 100, 9.0, "/untagged.jpg"),
            PosterImage::new(Some("zh"), 1, 1.0, "/zh.jpg"),
            PosterImage::new(Some("en"), 50, 9.0, "/en.jpg"),
        ]);
        assert_eq!(select_poster(&set, &prefs().localized).as_deref(), Some("/zh.jpg"));
        assert_eq!(select_poster(&set, &prefs().english).as_deref(), Some("/en.jpg"));
    }

    #[test]
    fn test_untagged_fallback_and_absent() {
        let set = PosterSet::new(vec![
            PosterImage::new(None, 1, 1.0, "/untagged.jpg"),
            PosterImage::new(Some("fr"), 99, 9.0, "/fr.jpg"),
        ]);
        assert_eq!(
            select_poster(&set, &prefs().localized).as_deref(),
            Some("/untagged.jpg")
        );

        let set = PosterSet::new(vec![PosterImage::new(Some("fr"), 99, 9.0, "/fr.jpg")]);
        assert_eq!(select_poster(&set, &prefs().localized), None);
        assert_eq!(select_poster(&PosterSet::default(), &prefs().english), None);
    }

    #[test]
    fn test_never_returns_unrequested_language() {
        let set = PosterSet::new(vec![
            PosterImage::new(Some("ko"), 30, 8.0, "/ko.jpg"),
            PosterImage::new(Some("ja"), 20, 8.0, "/ja.jpg"),
            PosterImage::new(Some("en"), 10, 8.0, "/en.jpg"),
        ]);
        let picked = select_poster(&set, &prefs().localized);
        assert_eq!(picked, None);
        let picked = select_poster(&set, &prefs().english).unwrap();
        let tag = set
            .posters
            .iter()
            .find(|p| p.file_path.as_deref() == Some(picked.as_str()))
            .and_then(|p| p.iso_639_1.clone());
        assert!(prefs().english.contains(&tag));
    }

    #[test]
    fn test_pick_builds_urls() {
        let set = PosterSet::new(vec![
            PosterImage::new(Some("zh"), 3, 5.0, "/zh.jpg"),
            PosterImage::new(Some("en"), 3, 5.0, "/en.jpg"),
        ]);
        let choice = PosterChoice::pick(&set, &prefs(), "https://image.tmdb.org/t/p/original");
        assert_eq!(
            choice.localized.as_deref(),
            Some("https://image.tmdb.org/t/p/original/zh.jpg")
        );
        assert_eq!(
            choice.english.as_deref(),
            Some("https://image.tmdb.org/t/p/original/en.jpg")
        );
    }
}
