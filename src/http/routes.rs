use super::handlers;
use super::state::AppState;
use super::ws;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.service.http.static_dir).to_path_buf();
    let index = static_dir.join("index.html");

    Router::new()
        // Audio relay
        .route("/ws", get(ws::ws_handler))
        // Translation
        .route("/api/translate", post(handlers::translate))
        // Health and inspection
        .route("/api/health", get(handlers::health_check))
        .route("/api/sessions/:session_id", get(handlers::session_status))
        // Frontend, with index.html for client-side routes
        .fallback_service(ServeDir::new(static_dir).not_found_service(ServeFile::new(index)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
