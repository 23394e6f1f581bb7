use std::sync::Arc;

use nq_core::{ArticleIndex, Error, Result};
use nq_inference::EmbeddingGenerator;

pub mod backends;

pub use backends::*;

/// Names accepted by [`create_index`].
pub const INDEX_KINDS: &[&str] = &["memory"];

/// Builds the index backend called `kind` on top of `generator`.
pub fn create_index(kind: &str, generator: EmbeddingGenerator) -> Result<Arc<dyn ArticleIndex>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryIndex::new(generator))),
        other => Err(Error::Config(format!(
            "Unknown index backend: {} (available: {})",
            other,
            INDEX_KINDS.join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_index;
    pub use nq_core::ArticleIndex;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nq_inference::Config;

    #[tokio::test]
    async fn test_create_memory_index() {
        let generator = EmbeddingGenerator::from_config(&Config::default()).unwrap();
        let index = create_index("memory", generator).unwrap();
        assert_eq!(index.count().await, 0);
    }

    #[test]
    fn test_create_unknown_index() {
        let generator = EmbeddingGenerator::from_config(&Config::default()).unwrap();
        let err = create_index("qdrant", generator).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
