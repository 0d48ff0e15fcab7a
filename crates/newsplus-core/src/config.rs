use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `news.api_key`
pub const API_KEY_ENV: &str = "NEWSPLUS_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Headline source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// API base URL, without the endpoint path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as X-Api-Key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Two-letter country code for top headlines
    #[serde(default = "default_country")]
    pub country: String,
    /// Optional category filter (business, technology, ...)
    #[serde(default)]
    pub category: Option<String>,
    /// Number of articles requested per fetch
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            country: default_country(),
            category: None,
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsplus")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_timeout() -> u64 {
    30
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.news.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, filling in defaults
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newsplus/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newsplus")
            .join("config.toml")
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("newsplus.db")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.news.base_url, "https://newsapi.org/v2");
        assert_eq!(config.news.country, "us");
        assert_eq!(config.news.page_size, 20);
        assert!(config.news.api_key.is_none());
        assert_eq!(config.sync.request_timeout_secs, 30);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
            [news]
            country = "gb"
            category = "technology"

            [general]
            data_dir = "/tmp/newsplus-test"
            "#,
        )
        .unwrap();

        assert_eq!(config.news.country, "gb");
        assert_eq!(config.news.category.as_deref(), Some("technology"));
        assert_eq!(config.news.page_size, 20);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/newsplus-test/newsplus.db")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[news\ncountry = 1").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(std::path::Path::new("~/news")), home.join("news"));
        }
        assert_eq!(
            expand_tilde(std::path::Path::new("/var/news")),
            PathBuf::from("/var/news")
        );
    }
}
