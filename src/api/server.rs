//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use super::{
    handlers,
    models::{CreateVideoRequest, ErrorResponse, RelatedQuery},
};
use crate::catalog::{CatalogError, CatalogStore};
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
    pub config: Arc<Config>,
}

/// Build the application router
pub fn router(store: CatalogStore, config: Arc<Config>) -> Router {
    let enable_cors = config.server.enable_cors;
    let app_state = AppState { store, config };

    let app = Router::new()
        // Health check endpoints (both paths for compatibility)
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))

        // Catalog endpoints
        .route("/api/videos", get(list_videos_handler).post(create_video_handler))
        .route("/api/videos/:id", get(get_video_handler).delete(delete_video_handler))
        .route("/api/videos/:id/related", get(related_videos_handler))

        // Search
        .route("/api/search", get(search_handler))

        .with_state(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if enable_cors {
        // Allow browser access from the front-end dev server
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
        app.layer(cors)
    } else {
        app
    }
}

/// Configure and start the HTTP server
pub async fn start_http_server(store: CatalogStore, config: Arc<Config>) -> Result<()> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    let app = router(store, config);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("🌐 API server listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map catalog failures to status codes
fn error_response(e: CatalogError) -> Response {
    let (status, message) = match &e {
        CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "Video not found".to_string()),
        CatalogError::Invalid(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
        CatalogError::Io(_) | CatalogError::Serde(_) | CatalogError::IdsExhausted(_) => {
            error!("Catalog failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
        }
    };

    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check()))
}

/// List videos handler
async fn list_videos_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::list_videos(&state.store).await))
}

/// Single video handler
async fn get_video_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match handlers::get_video(&state.store, id).await {
        Ok(video) => (StatusCode::OK, Json(video)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create video handler
async fn create_video_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateVideoRequest>,
) -> Response {
    match handlers::create_video(&state.store, payload.into()).await {
        Ok(video) => (StatusCode::CREATED, Json(video)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete video handler
async fn delete_video_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match handlers::delete_video(&state.store, id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Search handler
async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::search_videos(&state.store, &query).await))
}

/// Related videos handler
async fn related_videos_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<RelatedQuery>,
) -> Response {
    let limit = query.limit_or(state.config.search.related_limit);

    match handlers::get_related_videos(&state.store, id, limit).await {
        Ok(videos) => (StatusCode::OK, Json(videos)).into_response(),
        Err(e) => error_response(e),
    }
}
