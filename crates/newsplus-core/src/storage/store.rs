use async_trait::async_trait;

use crate::Result;

/// Key under which the liked article ids are persisted
pub const LIKED_ARTICLES_KEY: &str = "likedArticles";

/// Flat key-value persistence of string lists
///
/// Last write wins. A key that was never written reads as an empty list.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn get_string_list(&self, key: &str) -> Result<Vec<String>>;

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<()>;
}
