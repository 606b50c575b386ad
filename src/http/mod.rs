//! HTTP and WebSocket surface
//!
//! - GET /ws - Audio relay (binary chunks in, JSON messages out)
//! - POST /api/translate - Translate a transcript
//! - GET /api/health - Health check with the live session count
//! - GET /api/sessions/:id - Inspect a live session
//! - everything else - Frontend static files

mod handlers;
mod routes;
mod state;
mod ws;

pub use handlers::{ErrorResponse, HealthResponse, TranslateRequest, TranslateResponse};
pub use routes::create_router;
pub use state::AppState;
pub use ws::SESSION_ID_HEADER;
