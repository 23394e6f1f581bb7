use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A fixed-length vector representing a piece of text.
pub type Embedding = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub content: String,
    pub url: String,
    /// Publication timestamp exactly as the source reported it.
    pub published_date: String,
}

impl Article {
    /// Builds an article stamped with the current UTC time.
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
            published_date: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_published_date(mut self, published_date: impl Into<String>) -> Self {
        self.published_date = published_date.into();
        self
    }

    /// The text an article is embedded from: title and content joined by a space.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// An article paired with its similarity to a query. Produced per query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub article: Article,
    pub score: f64,
}
