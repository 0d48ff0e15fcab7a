use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::ArticleStore;
use crate::Result;

/// Process-local store, used in tests and when no data directory is wanted
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one key already populated
    pub fn with_list(key: &str, values: &[&str]) -> Self {
        let mut lists = HashMap::new();
        lists.insert(
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        Self {
            lists: RwLock::new(lists),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        Ok(self.lists.read().await.get(key).cloned().unwrap_or_default())
    }

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<()> {
        self.lists
            .write()
            .await
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.get_string_list("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::with_list("k", &["a"]);
        store
            .set_string_list("k", &["b".to_string(), "c".to_string()])
            .await
            .unwrap();
        assert_eq!(store.get_string_list("k").await.unwrap(), vec!["b", "c"]);
    }
}
