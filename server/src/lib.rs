use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use engine::{DocId, DocumentStatus, SearchError, SearchHit, SearchIndex};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub status: DocumentStatus,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Deserialize)]
pub struct AddDocumentRequest {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<RwLock<SearchIndex>>,
}

/// Build the router over a freshly configured index. Searches take the
/// read lock, ingestion the write lock.
pub fn build_app(index: SearchIndex) -> Router {
    let state = AppState {
        index: Arc::new(RwLock::new(index)),
    };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/documents", post(add_document_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
        .layer(cors)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let results = state
        .index
        .read()
        .find_top_documents_with_status(&params.q, params.status)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, hits = results.len(), "search served");
    Ok(Json(SearchResponse {
        query: params.q,
        took_s,
        count: results.len(),
        results,
    }))
}

pub async fn add_document_handler(
    State(state): State<AppState>,
    Json(req): Json<AddDocumentRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let outcome = state
        .index
        .write()
        .add_document(req.id, &req.text, req.status, &req.ratings);
    match outcome {
        Ok(()) => {
            tracing::info!(id = req.id, "document ingested");
            Ok(StatusCode::CREATED)
        }
        Err(e @ SearchError::DuplicateDocumentId(_)) => Err((StatusCode::CONFLICT, e.to_string())),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let documents = state.index.read().document_count();
    Json(serde_json::json!({ "documents": documents }))
}
