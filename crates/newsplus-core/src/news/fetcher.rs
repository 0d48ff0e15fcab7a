use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy};
use url::Url;

use super::models::Article;
use super::parser::parse_headlines;
use crate::config::AppConfig;
use crate::{Error, Result};

const TOP_HEADLINES_PATH: &str = "top-headlines";
const API_KEY_HEADER: &str = "x-api-key";
const MAX_RESPONSE_BYTES: u64 = 5 * 1024 * 1024;

/// Source of the current top headlines
///
/// One call is one remote request. Implementations do not retry.
#[async_trait]
pub trait HeadlineFetcher: Send + Sync {
    async fn fetch_headlines(&self) -> Result<Vec<Article>>;
}

/// Fetches top headlines from a NewsAPI-compatible endpoint
pub struct NewsApiFetcher {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl NewsApiFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.sync.request_timeout_secs, &config.sync.proxy_url)?;
        let endpoint = Self::build_endpoint(config)?;

        if config.news.api_key.is_none() {
            tracing::warn!("No news API key configured; requests will likely be rejected");
        }

        Ok(Self {
            client,
            endpoint,
            api_key: config.news.api_key.clone(),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for headline fetching");
        }

        builder.build().map_err(Error::Http)
    }

    /// Compose the top-headlines URL with its query string
    fn build_endpoint(config: &AppConfig) -> Result<Url> {
        let base = config.news.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, TOP_HEADLINES_PATH))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("country", &config.news.country);
            if let Some(ref category) = config.news.category {
                query.append_pair("category", category);
            }
            query.append_pair("pageSize", &config.news.page_size.to_string());
        }

        Ok(url)
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("newsplus/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(ref key) = self.api_key {
            match HeaderValue::from_str(key) {
                Ok(value) => {
                    headers.insert(API_KEY_HEADER, value);
                }
                Err(_) => tracing::warn!("API key contains invalid header characters, not sent"),
            }
        }
        headers
    }

    /// The fully composed request URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self) -> Result<(reqwest::StatusCode, Bytes)> {
        let mut response = self
            .client
            .get(self.endpoint.clone())
            .headers(self.build_headers())
            .send()
            .await?;

        let status = response.status();
        if let Some(len) = response.content_length() {
            ensure_content_size(len)?;
        }

        // Compressed and chunked bodies have no length up front.
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            ensure_content_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        Ok((status, body.freeze()))
    }
}

fn ensure_content_size(len: u64) -> Result<()> {
    if len > MAX_RESPONSE_BYTES {
        return Err(Error::Fetch(format!("Response too large ({} bytes)", len)));
    }
    Ok(())
}

#[async_trait]
impl HeadlineFetcher for NewsApiFetcher {
    async fn fetch_headlines(&self) -> Result<Vec<Article>> {
        tracing::info!("Fetching top headlines from: {}", self.endpoint);

        let (status, body) = self.request().await?;

        if !status.is_success() {
            // Error payloads carry a readable message; prefer it over the bare status.
            return match parse_headlines(&body) {
                Err(Error::Fetch(message)) => Err(Error::Fetch(format!("HTTP {}: {}", status, message))),
                _ => Err(Error::Fetch(format!("HTTP {}", status))),
            };
        }

        let articles = parse_headlines(&body)?;
        tracing::debug!("Received {} headlines", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = AppConfig::default();
        let fetcher = NewsApiFetcher::new(&config).unwrap();

        assert_eq!(
            fetcher.endpoint().as_str(),
            "https://newsapi.org/v2/top-headlines?country=us&pageSize=20"
        );
    }

    #[test]
    fn test_endpoint_with_category_and_trailing_slash() {
        let mut config = AppConfig::default();
        config.news.base_url = "http://localhost:8080/v2/".to_string();
        config.news.country = "de".to_string();
        config.news.category = Some("science".to_string());
        config.news.page_size = 5;

        let fetcher = NewsApiFetcher::new(&config).unwrap();
        assert_eq!(
            fetcher.endpoint().as_str(),
            "http://localhost:8080/v2/top-headlines?country=de&category=science&pageSize=5"
        );
    }

    #[test]
    fn test_api_key_header() {
        let mut config = AppConfig::default();
        config.news.api_key = Some("secret".to_string());
        let fetcher = NewsApiFetcher::new(&config).unwrap();

        let headers = fetcher.build_headers();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_response_size_cap() {
        assert!(ensure_content_size(0).is_ok());
        assert!(ensure_content_size(MAX_RESPONSE_BYTES).is_ok());
        assert!(matches!(
            ensure_content_size(MAX_RESPONSE_BYTES + 1),
            Err(Error::Fetch(message)) if message.contains("too large")
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = AppConfig::default();
        config.news.base_url = "not a url".to_string();
        assert!(matches!(NewsApiFetcher::new(&config), Err(Error::UrlParse(_))));
    }
}
