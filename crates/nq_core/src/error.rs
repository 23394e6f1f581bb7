use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Dimension mismatch: {left} vs {right} components")]
    DimensionMismatch { left: usize, right: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for failures of the embedding backend, which callers may choose
    /// to skip over instead of aborting.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(self, Error::EmbeddingUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
