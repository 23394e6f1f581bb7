use std::fmt;
use std::time::Duration;

pub mod embeddings;
pub mod models;
pub mod similarity;

/// Vector length produced by the reference embedding backend.
pub const DEFAULT_DIMENSION: usize = 512;

/// Upper bound on a single embedding call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Config {
    /// Credential for the embedding backend. Only its presence is inspected.
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub dimension: usize,
    pub timeout: Duration,
}

impl Config {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: None,
            dimension: DEFAULT_DIMENSION,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub mod prelude {
    pub use super::embeddings::EmbeddingGenerator;
    pub use super::models::{create_embedder, HashSineEmbedder};
    pub use super::similarity::cosine_similarity;
    pub use super::Config;
    pub use nq_core::{Article, Embedder, Embedding, Error, Result};
}

pub use embeddings::EmbeddingGenerator;
pub use models::{create_embedder, HashSineEmbedder};
pub use similarity::cosine_similarity;
