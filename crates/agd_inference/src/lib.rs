pub mod models;

pub use models::{create_summarizer, InferenceConfig, ModelRanker, OpenAiSummarizer};

pub mod prelude {
    pub use super::models::{create_summarizer, InferenceConfig};
    pub use agd_core::{Article, Error, Result, Summarizer};
}
