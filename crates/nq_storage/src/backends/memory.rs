use std::sync::Arc;

use async_trait::async_trait;
use nq_core::{Article, ArticleIndex, Embedding, Result, SimilarityResult};
use nq_inference::{cosine_similarity, EmbeddingGenerator};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Default number of articles returned by a query.
pub const DEFAULT_QUERY_LIMIT: usize = 3;

/// An article together with the embedding computed when it was indexed.
#[derive(Debug)]
pub struct IndexEntry {
    pub article: Article,
    pub embedding: Embedding,
}

/// In-memory vector index with brute-force cosine ranking.
///
/// Every query scores all stored entries, so cost grows linearly with the
/// number of indexed articles. Entries are append-only.
#[derive(Debug)]
pub struct MemoryIndex {
    generator: EmbeddingGenerator,
    entries: RwLock<Vec<Arc<IndexEntry>>>,
}

impl MemoryIndex {
    pub fn new(generator: EmbeddingGenerator) -> Self {
        Self {
            generator,
            entries: RwLock::new(Vec::new()),
        }
    }

    async fn snapshot(&self) -> Vec<Arc<IndexEntry>> {
        self.entries.read().await.clone()
    }

    async fn rank(&self, text: &str, limit: usize) -> Result<Vec<SimilarityResult>> {
        let entries = self.snapshot().await;
        if entries.is_empty() {
            warn!("No articles indexed yet");
            return Ok(Vec::new());
        }

        let query = self.generator.text_embedding(text).await?;
        let mut scored = Vec::with_capacity(entries.len());
        for entry in &entries {
            let score = cosine_similarity(&query, &entry.embedding)?;
            scored.push((entry, score));
        }

        // Stable: equal scores keep insertion order.
        scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(entry, score)| SimilarityResult {
                article: entry.article.clone(),
                score,
            })
            .collect())
    }
}

#[async_trait]
impl ArticleIndex for MemoryIndex {
    async fn index(&self, article: Article) -> Result<()> {
        let embedding = self.generator.article_embedding(&article).await?;
        debug!("Indexed article: {}", article.title);
        self.entries
            .write()
            .await
            .push(Arc::new(IndexEntry { article, embedding }));
        Ok(())
    }

    async fn query(&self, text: &str, limit: usize) -> Result<Vec<Article>> {
        Ok(self
            .rank(text, limit)
            .await?
            .into_iter()
            .map(|result| result.article)
            .collect())
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SimilarityResult>> {
        self.rank(text, limit).await
    }

    async fn articles(&self) -> Vec<Article> {
        self.entries
            .read()
            .await
            .iter()
            .map(|entry| entry.article.clone())
            .collect()
    }

    async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nq_core::Embedder;
    use nq_inference::Config;

    fn sample_articles() -> Vec<Article> {
        vec![
            Article::new(
                "AI Breakthrough in Healthcare",
                "Scientists have developed a new AI model that can predict patient outcomes with 95% accuracy. The model uses deep learning to analyze medical records and identify patterns that human doctors might miss.",
                "https://example.com/ai-healthcare",
            ),
            Article::new(
                "Climate Change Impact on Agriculture",
                "A new study shows that changing weather patterns are affecting crop yields worldwide. Farmers are adapting by using drought-resistant crops and advanced irrigation systems.",
                "https://example.com/climate-agriculture",
            ),
            Article::new(
                "Space Exploration Update",
                "NASA announces plans for new Mars mission in 2026. The mission will focus on searching for signs of ancient microbial life and testing new propulsion technologies.",
                "https://example.com/space-exploration",
            ),
        ]
    }

    fn configured_index() -> MemoryIndex {
        let config = Config::default().with_api_key("test-key");
        MemoryIndex::new(EmbeddingGenerator::from_config(&config).unwrap())
    }

    async fn seeded_index() -> MemoryIndex {
        let index = configured_index();
        for article in sample_articles() {
            index.index(article).await.unwrap();
        }
        index
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_index_grows_count() {
        let index = configured_index();
        assert_eq!(index.count().await, 0);
        for (n, article) in sample_articles().into_iter().enumerate() {
            index.index(article).await.unwrap();
            assert_eq!(index.count().await, n + 1);
        }
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let index = configured_index();
        let article = sample_articles().remove(0);
        index.index(article.clone()).await.unwrap();
        index.index(article).await.unwrap();
        assert_eq!(index.count().await, 2);
    }

    #[tokio::test]
    async fn test_empty_index_query() {
        let index = configured_index();
        assert!(index.query("anything", DEFAULT_QUERY_LIMIT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_query_without_credential() {
        let index = MemoryIndex::new(EmbeddingGenerator::from_config(&Config::default()).unwrap());
        assert!(index.query("anything", DEFAULT_QUERY_LIMIT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_farming_query_ranking() {
        let index = seeded_index().await;
        let results = index.query("Tell me about farming and weather", 2).await.unwrap();
        // Pinned to the hash-sine transform: the query hash lands closest to
        // the space article, then the agriculture one.
        assert_eq!(
            titles(&results),
            vec!["Space Exploration Update", "Climate Change Impact on Agriculture"]
        );
    }

    #[tokio::test]
    async fn test_search_scores_are_descending() {
        let index = seeded_index().await;
        for query in ["What's new in healthcare AI?", "Tell me about farming and weather", "Latest space news"] {
            let results = index.search(query, 10).await.unwrap();
            assert_eq!(results.len(), 3);
            assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(results.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
        }
    }

    #[tokio::test]
    async fn test_search_matches_direct_scoring() {
        let index = seeded_index().await;
        let generator = EmbeddingGenerator::from_config(&Config::default().with_api_key("k")).unwrap();
        let query = generator.text_embedding("Latest space news").await.unwrap();

        let results = index.search("Latest space news", 3).await.unwrap();
        for result in results {
            let embedding = generator.article_embedding(&result.article).await.unwrap();
            assert_eq!(result.score, cosine_similarity(&query, &embedding).unwrap());
        }
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let index = configured_index();
        // Anagrams share a code unit sum, hence an identical embedding.
        index.index(Article::new("listen", "", "https://example.com/1")).await.unwrap();
        index.index(Article::new("other words", "", "https://example.com/2")).await.unwrap();
        index.index(Article::new("silent", "", "https://example.com/3")).await.unwrap();
        index.index(Article::new("enlist", "", "https://example.com/4")).await.unwrap();

        let results = index.query("tinsel ", 4).await.unwrap();
        let urls: Vec<&str> = results.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(&urls[..3], &["https://example.com/1", "https://example.com/3", "https://example.com/4"]);
        assert_eq!(urls[3], "https://example.com/2");
    }

    #[tokio::test]
    async fn test_limit_is_respected() {
        let index = seeded_index().await;
        assert_eq!(index.query("space", 2).await.unwrap().len(), 2);
        assert_eq!(index.query("space", 10).await.unwrap().len(), 3);
        assert!(index.query("space", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_embedder_leaves_index_unchanged() {
        let generator = EmbeddingGenerator::from_config(&Config::default()).unwrap();
        assert_eq!(generator.model().name(), "hash-sine");
        let index = MemoryIndex::new(generator);

        let err = index.index(sample_articles().remove(0)).await.unwrap_err();
        assert!(err.is_embedding_unavailable());
        assert_eq!(index.count().await, 0);
    }

    #[tokio::test]
    async fn test_articles_in_insertion_order() {
        let index = seeded_index().await;
        let articles = index.articles().await;
        assert_eq!(
            titles(&articles),
            vec![
                "AI Breakthrough in Healthcare",
                "Climate Change Impact on Agriculture",
                "Space Exploration Update"
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_indexing() {
        let index = Arc::new(configured_index());
        let mut handles = Vec::new();
        for n in 0..32 {
            let index = index.clone();
            handles.push(tokio::spawn(async move {
                let article = Article::new(format!("Article {}", n), "body", format!("https://example.com/{}", n));
                index.index(article).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(index.count().await, 32);
        assert_eq!(index.search("Article", 100).await.unwrap().len(), 32);
    }
}
