//! Article records: the read-only domain input of the card browser.
//!
//! Articles carry only metadata. Everything the scene needs per card
//! (transform, layout slots, appearance, texture) lives in
//! [`Card`](crate::card::Card), joined back to its article by [`ArticleId`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CardViewError;

/// Stable identity of an article (and of the card that displays it).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ArticleId(pub u32);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One article as listed by the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article identity.
    pub id: ArticleId,
    /// Headline shown on the card.
    pub title: String,
    /// Category label (topic digest, research report, ...).
    pub category: String,
    /// Accent color as `#rrggbb`.
    pub color: String,
    /// Thumbnail location (URL or local path). Missing thumbnails use a
    /// generated placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Article {
    /// Accent color as linear 0..1 RGB. Malformed colors fall back to grey.
    #[must_use]
    pub fn accent_rgb(&self) -> [f32; 3] {
        parse_hex_color(&self.color).map_or([0.5, 0.5, 0.5], |[r, g, b]| {
            [
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            ]
        })
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) color string.
///
/// # Errors
///
/// Returns [`CardViewError::InvalidColor`] when the string is not six hex
/// digits after an optional leading `#`.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], CardViewError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CardViewError::InvalidColor(s.to_owned()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| CardViewError::InvalidColor(s.to_owned()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Parse an article list from a JSON array.
///
/// # Errors
///
/// Returns [`CardViewError::ArticlesParse`] if the JSON is malformed or two
/// articles share an id.
pub fn parse_articles(json: &str) -> Result<Vec<Article>, CardViewError> {
    let articles: Vec<Article> = serde_json::from_str(json)
        .map_err(|e| CardViewError::ArticlesParse(e.to_string()))?;

    let mut seen = rustc_hash::FxHashSet::default();
    for article in &articles {
        if !seen.insert(article.id) {
            return Err(CardViewError::ArticlesParse(format!(
                "duplicate article id {}",
                article.id
            )));
        }
    }
    Ok(articles)
}

/// Load an article list from a JSON file.
///
/// # Errors
///
/// Returns [`CardViewError::Io`] if the file cannot be read, or
/// [`CardViewError::ArticlesParse`] if its contents are invalid.
pub fn load_articles(path: &Path) -> Result<Vec<Article>, CardViewError> {
    let content = std::fs::read_to_string(path)?;
    let articles = parse_articles(&content)?;
    log::info!("Loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ff6b6b").unwrap(), [255, 107, 107]);
        assert_eq!(parse_hex_color("4ecdc4").unwrap(), [78, 205, 196]);
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn malformed_color_falls_back_to_grey() {
        let article = Article {
            id: ArticleId(1),
            title: "Wafer fab capacity outlook".into(),
            category: "Fab".into(),
            color: "red".into(),
            thumbnail: None,
        };
        assert_eq!(article.accent_rgb(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn parses_article_list() {
        let json = r##"[
            {"id": 1, "title": "EUV roadmap", "category": "Lithography",
             "color": "#ff6b6b", "thumbnail": "thumbs/euv.png"},
            {"id": 2, "title": "HBM supply", "category": "Memory",
             "color": "#4ecdc4"}
        ]"##;
        let articles = parse_articles(json).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].thumbnail.as_deref(), Some("thumbs/euv.png"));
        assert_eq!(articles[1].thumbnail, None);
        assert_eq!(articles[1].id, ArticleId(2));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r##"[
            {"id": 3, "title": "a", "category": "x", "color": "#000000"},
            {"id": 3, "title": "b", "category": "y", "color": "#000000"}
        ]"##;
        let err = parse_articles(json).unwrap_err();
        assert!(err.to_string().contains("duplicate article id 3"));
    }
}
