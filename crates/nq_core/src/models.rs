use std::fmt;

use async_trait::async_trait;

use crate::types::Embedding;
use crate::Result;

/// A backend that turns text into an embedding.
///
/// Implementations must be deterministic for a given backend state and must
/// fail with [`crate::Error::EmbeddingUnavailable`] rather than hang or hand
/// back a placeholder vector when they cannot produce one.
#[async_trait]
pub trait Embedder: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Length of every vector this backend returns.
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Embedding>;
}
