use std::sync::Arc;
use std::time::Duration;

use nq_core::{Article, Embedder, Embedding, Error, Result};

use crate::{models, Config, DEFAULT_TIMEOUT};

/// Front door to an embedding backend.
///
/// Bounds every call by a timeout and checks the returned vector against the
/// backend's declared dimension.
#[derive(Debug, Clone)]
pub struct EmbeddingGenerator {
    model: Arc<dyn Embedder>,
    timeout: Duration,
}

impl EmbeddingGenerator {
    pub fn new(model: Arc<dyn Embedder>) -> Self {
        Self {
            model,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(models::create_embedder(config)?).with_timeout(config.timeout))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &Arc<dyn Embedder> {
        &self.model
    }

    pub async fn article_embedding(&self, article: &Article) -> Result<Embedding> {
        self.text_embedding(&article.embedding_text()).await
    }

    pub async fn text_embedding(&self, text: &str) -> Result<Embedding> {
        let embedding = tokio::time::timeout(self.timeout, self.model.embed(text))
            .await
            .map_err(|_| {
                Error::EmbeddingUnavailable(format!(
                    "{} did not answer within {:?}",
                    self.model.name(),
                    self.timeout
                ))
            })??;

        if embedding.len() != self.model.dimension() {
            return Err(Error::DimensionMismatch {
                left: embedding.len(),
                right: self.model.dimension(),
            });
        }
        Ok(embedding)
    }
}
