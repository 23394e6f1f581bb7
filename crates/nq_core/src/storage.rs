use async_trait::async_trait;

use crate::types::{Article, SimilarityResult};
use crate::Result;

#[async_trait]
pub trait ArticleIndex: Send + Sync {
    /// Embed an article and append it to the index.
    async fn index(&self, article: Article) -> Result<()>;

    /// Articles most similar to `text`, best first, at most `limit` of them.
    async fn query(&self, text: &str, limit: usize) -> Result<Vec<Article>>;

    /// Like [`ArticleIndex::query`] but keeps the similarity scores.
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SimilarityResult>>;

    /// All indexed articles in insertion order.
    async fn articles(&self) -> Vec<Article>;

    async fn count(&self) -> usize;
}
