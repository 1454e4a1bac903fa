pub mod config;
pub mod error;
pub mod models;
pub mod types;

pub use config::{
    CategoryConfig, CategoryRule, DigestConfig, KeywordConfig, Language, ScrapeConfig,
    SourceCredibility,
};
pub use error::Error;
pub use models::{RankStrategy, Summarizer};
pub use types::Article;

pub type Result<T> = std::result::Result<T, Error>;
