pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::Embedder;
pub use storage::ArticleIndex;
pub use types::{Article, Embedding, SimilarityResult};
