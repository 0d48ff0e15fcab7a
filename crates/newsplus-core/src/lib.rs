pub mod config;
pub mod error;
pub mod news;
pub mod storage;
pub mod view_model;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use view_model::{ArticlesChangedCallback, FetchOutcome, NewsViewModel};
