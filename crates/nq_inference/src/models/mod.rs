use std::sync::Arc;

use nq_core::{Embedder, Error, Result};
use tracing::info;

use crate::Config;

pub mod hash_sine;

pub use hash_sine::HashSineEmbedder;

/// Builds the embedding backend named by `config.model_name`.
///
/// Construction never fails for a missing credential; the backend reports
/// that on first use instead.
pub fn create_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    let name = config.model_name.as_deref().unwrap_or(HashSineEmbedder::NAME);
    let model: Arc<dyn Embedder> = match name {
        HashSineEmbedder::NAME | "mock" => Arc::new(HashSineEmbedder::new(config)),
        other => return Err(Error::Config(format!("Unknown embedding model: {}", other))),
    };
    info!("🧠 Embedding model ready (using {}, {} dimensions)", model.name(), model.dimension());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_embedder() {
        let model = create_embedder(&Config::default()).unwrap();
        assert_eq!(model.name(), HashSineEmbedder::NAME);
        assert_eq!(model.dimension(), crate::DEFAULT_DIMENSION);
    }

    #[test]
    fn test_create_unknown_embedder() {
        let config = Config {
            model_name: Some("word2vec".to_string()),
            ..Config::default()
        };
        let err = create_embedder(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
