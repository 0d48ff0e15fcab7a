use async_trait::async_trait;
use sqlx::Row;

use super::retry::with_retry;
use super::store::ArticleStore;
use super::Database;
use crate::Result;

/// Durable string-list store backed by the `string_lists` table
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        let pool = self.db.pool().clone();

        let row = with_retry("read", || {
            let pool = pool.clone();
            async move {
                sqlx::query("SELECT value FROM string_lists WHERE key = ?")
                    .bind(key)
                    .fetch_optional(&pool)
                    .await
            }
        })
        .await?;

        match row {
            Some(row) => {
                let value: String = row.get("value");
                Ok(serde_json::from_str(&value)?)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<()> {
        let pool = self.db.pool().clone();
        let value = serde_json::to_string(values)?;

        with_retry("write", || {
            let pool = pool.clone();
            let value = value.clone();
            async move {
                sqlx::query(
                    r#"
                    INSERT INTO string_lists (key, value, updated_at)
                    VALUES (?, ?, CURRENT_TIMESTAMP)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = CURRENT_TIMESTAMP
                    "#,
                )
                .bind(key)
                .bind(&value)
                .execute(&pool)
                .await
                .map(|_| ())
            }
        })
        .await?;

        tracing::debug!("Stored {} values under '{}'", values.len(), key);
        Ok(())
    }
}
