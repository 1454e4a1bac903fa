use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

/// External summarization collaborator. Optional: the digest renders without
/// summaries when no implementation is configured or a call fails.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a short (2-3 sentence) summary for one article.
    async fn summarize_article(&self, article: &Article) -> Result<String>;
}

/// One named ranking strategy. Strategies are tried in a fixed order; a
/// failing strategy yields to the next one and the failure is logged with its
/// name.
#[async_trait]
pub trait RankStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Return an importance-ordered, capped subset of the input articles.
    async fn rank(&self, articles: &[Article]) -> Result<Vec<Article>>;
}
