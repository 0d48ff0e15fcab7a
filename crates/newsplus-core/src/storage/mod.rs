mod database;
mod liked;
mod memory;
mod retry;
mod sqlite_store;
mod store;

pub use database::Database;
pub use liked::LikedIds;
pub use memory::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use store::{ArticleStore, LIKED_ARTICLES_KEY};
