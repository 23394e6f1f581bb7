use std::sync::Arc;

use nq_core::ArticleIndex;

pub struct AppState {
    pub index: Arc<dyn ArticleIndex>,
}

impl AppState {
    pub fn new(index: Arc<dyn ArticleIndex>) -> Self {
        Self { index }
    }
}
