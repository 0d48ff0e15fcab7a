use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of an article, derived from its source URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ArticleId {
    /// Canonical URL of the article
    Url(String),
    /// The source gave no URL; such articles cannot be liked
    #[default]
    Unidentified,
}

impl ArticleId {
    /// Build an id from an optional URL, treating blank URLs as missing
    pub fn from_url(url: Option<&str>) -> Self {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => ArticleId::Url(url.to_string()),
            _ => ArticleId::Unidentified,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArticleId::Url(url) => Some(url),
            ArticleId::Unidentified => None,
        }
    }
}

impl From<Option<String>> for ArticleId {
    fn from(url: Option<String>) -> Self {
        ArticleId::from_url(url.as_deref())
    }
}

impl From<ArticleId> for Option<String> {
    fn from(id: ArticleId) -> Self {
        match id {
            ArticleId::Url(url) => Some(url),
            ArticleId::Unidentified => None,
        }
    }
}

/// A headline as held by the view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "url", default)]
    pub id: ArticleId,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    /// Timestamp string as delivered by the source
    pub published_at: Option<String>,
    pub source_name: Option<String>,
    #[serde(default)]
    pub is_liked: bool,
}

impl Article {
    /// Create an article with only a URL set
    pub fn with_url(url: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            id: ArticleId::from_url(Some(url.as_str())),
            author: None,
            title: None,
            description: None,
            content: None,
            image_url: None,
            published_at: None,
            source_name: None,
            is_liked: false,
        }
    }

    /// The URL, if the article has one
    pub fn url(&self) -> Option<&str> {
        self.id.as_str()
    }

    /// Parse `published_at` as RFC 3339
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        self.published_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Title for display, falling back to a placeholder
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_is_unidentified() {
        assert_eq!(ArticleId::from_url(None), ArticleId::Unidentified);
        assert_eq!(ArticleId::from_url(Some("")), ArticleId::Unidentified);
        assert_eq!(ArticleId::from_url(Some("   ")), ArticleId::Unidentified);
        assert_eq!(
            ArticleId::from_url(Some("https://example.com/a")),
            ArticleId::Url("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_published_at_parsing() {
        let mut article = Article::with_url("https://example.com/a");
        article.published_at = Some("2024-05-01T12:30:00Z".to_string());
        let parsed = article.published_at_utc().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        article.published_at = Some("yesterday".to_string());
        assert!(article.published_at_utc().is_none());
    }

    #[test]
    fn test_serde_uses_url_field() {
        let article = Article::with_url("https://example.com/a");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["is_liked"], false);

        let mut orphan = Article::with_url("");
        orphan.title = Some("No link".to_string());
        let json = serde_json::to_value(&orphan).unwrap();
        assert!(json["url"].is_null());
    }

    #[test]
    fn test_deserialize_without_url() {
        let article: Article = serde_json::from_str(r#"{"title": "No link"}"#).unwrap();
        assert_eq!(article.id, ArticleId::Unidentified);
        assert_eq!(article.display_title(), "No link");
        assert!(!article.is_liked);

        let article: Article = serde_json::from_str(r#"{"url": " ", "is_liked": true}"#).unwrap();
        assert_eq!(article.id, ArticleId::Unidentified);

        let article: Article =
            serde_json::from_str(r#"{"url": " https://example.com/a "}"#).unwrap();
        assert_eq!(article.url(), Some("https://example.com/a"));
    }
}
