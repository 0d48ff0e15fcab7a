use serde::Deserialize;

use super::models::{Article, ArticleId};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    articles: Vec<RawArticle>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawArticle {
    source: Option<RawSource>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSource {
    name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            id: ArticleId::from_url(raw.url.as_deref()),
            author: raw.author,
            title: raw.title,
            description: raw.description,
            content: raw.content,
            image_url: raw.url_to_image,
            published_at: raw.published_at,
            source_name: raw.source.and_then(|s| s.name),
            is_liked: false,
        }
    }
}

/// Parse a top-headlines response body into articles
///
/// The source carries no like information, so every article starts unliked.
pub fn parse_headlines(body: &[u8]) -> Result<Vec<Article>> {
    let response: HeadlinesResponse = serde_json::from_slice(body)?;

    if response.status != "ok" {
        let message = response
            .message
            .unwrap_or_else(|| format!("API returned status '{}'", response.status));
        return Err(Error::Fetch(match response.code {
            Some(code) => format!("{} ({})", message, code),
            None => message,
        }));
    }

    Ok(response.articles.into_iter().map(Article::from).collect())
}
