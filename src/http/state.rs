use crate::config::Config;
use crate::relay::StreamingRelay;
use crate::translation::TranslationService;
use std::sync::Arc;

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    /// Streaming relay; owns the session registry
    pub relay: StreamingRelay,

    pub translator: Arc<TranslationService>,
}

impl AppState {
    pub fn new(config: Config, relay: StreamingRelay, translator: TranslationService) -> Self {
        Self {
            config: Arc::new(config),
            relay,
            translator: Arc::new(translator),
        }
    }
}
