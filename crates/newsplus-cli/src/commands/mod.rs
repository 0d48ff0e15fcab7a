pub mod headlines;
pub mod like;
pub mod liked;
pub mod open;

use std::sync::Arc;

use anyhow::Result;

use newsplus_core::{
    news::{Article, NewsApiFetcher},
    storage::{Database, SqliteStore},
    AppConfig, NewsViewModel,
};

/// Everything a command needs: the view model and the database behind it
pub struct Context {
    pub view_model: Arc<NewsViewModel>,
    db: Database,
}

impl Context {
    pub async fn open(config: &AppConfig) -> Result<Self> {
        tracing::debug!("Using data directory: {}", config.data_dir().display());

        let db = Database::new(config).await?;
        let store = Arc::new(SqliteStore::new(db.clone()));
        let fetcher = Arc::new(NewsApiFetcher::new(config)?);

        Ok(Self {
            view_model: Arc::new(NewsViewModel::new(fetcher, store)),
            db,
        })
    }

    pub async fn close(&self) {
        self.view_model.dispose();
        self.db.close().await;
    }
}

/// One line per article, numbered from 1, liked ones marked with a heart
pub fn render_article(position: usize, article: &Article) {
    let marker = if article.is_liked { "♥" } else { " " };
    println!("{:>3}. {} {}", position, marker, article.display_title());

    let mut meta = Vec::new();
    if let Some(source) = article.source_name.as_deref() {
        meta.push(source.to_string());
    }
    if let Some(published) = article.published_at_utc() {
        meta.push(published.format("%Y-%m-%d %H:%M").to_string());
    }
    if !meta.is_empty() {
        println!("       {}", meta.join(" · "));
    }

    match article.url() {
        Some(url) => println!("       {}", url),
        None => println!("       (no link)"),
    }
}
