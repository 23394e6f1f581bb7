use std::fmt;

use async_trait::async_trait;
use nq_core::{Embedder, Embedding, Error, Result};
use tracing::warn;

use crate::Config;

/// Deterministic placeholder embedding.
///
/// The text is hashed to the sum of its UTF-16 code units `h`, and component
/// `i` of the vector is `sin(h + i)`. Texts with the same code unit sum map to
/// the same vector.
pub struct HashSineEmbedder {
    dimension: usize,
    has_credential: bool,
}

impl HashSineEmbedder {
    pub const NAME: &'static str = "hash-sine";

    pub fn new(config: &Config) -> Self {
        let has_credential = config.has_credential();
        if !has_credential {
            warn!("No embedding API key configured, embedding requests will fail");
        }
        Self {
            dimension: config.dimension,
            has_credential,
        }
    }

    pub fn text_hash(text: &str) -> u64 {
        text.encode_utf16().map(u64::from).sum()
    }

    pub fn transform(text: &str, dimension: usize) -> Embedding {
        let hash = Self::text_hash(text) as f64;
        (0..dimension).map(|i| (hash + i as f64).sin()).collect()
    }
}

impl fmt::Debug for HashSineEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSineEmbedder")
            .field("dimension", &self.dimension)
            .field("has_credential", &self.has_credential)
            .finish()
    }
}

#[async_trait]
impl Embedder for HashSineEmbedder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        if !self.has_credential {
            return Err(Error::EmbeddingUnavailable(
                "embedding model not initialized: no API key configured".to_string(),
            ));
        }
        Ok(Self::transform(text, self.dimension))
    }
}
