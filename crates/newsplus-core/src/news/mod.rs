mod fetcher;
mod models;
mod parser;

pub use fetcher::{HeadlineFetcher, NewsApiFetcher};
pub use models::{Article, ArticleId};
pub use parser::parse_headlines;
