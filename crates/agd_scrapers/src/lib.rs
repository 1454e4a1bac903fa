pub mod manager;
pub mod sources;

pub use manager::SourceManager;
pub use sources::{Scraper, SourceMetadata};

pub mod prelude {
    pub use super::sources::Scraper;
    pub use agd_core::{Article, Error, Result};
}
