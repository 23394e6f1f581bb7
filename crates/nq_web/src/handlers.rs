use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nq_core::{Article, Error, SimilarityResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::AppState;

/// Results returned when a search does not ask for a specific amount.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SimilarityResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Index(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Index(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Index(err @ Error::EmbeddingUnavailable(_)) => {
                warn!("Embedding backend unavailable: {}", err);
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            ApiError::Index(err) => {
                error!("Index request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query parameter `q` is required".to_string()))?;
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    let results = state.index.search(query, limit).await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> Json<ArticlesResponse> {
    Json(ArticlesResponse {
        articles: state.index.articles().await,
    })
}

pub async fn count_articles(State(state): State<Arc<AppState>>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.index.count().await,
    })
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(article): Json<Article>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    state.index.index(article.clone()).await?;
    Ok((StatusCode::CREATED, Json(article)))
}
