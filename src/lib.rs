pub mod config;
pub mod http;
pub mod relay;
pub mod session;
pub mod transcription;
pub mod translation;

pub use config::Config;
pub use http::{create_router, AppState};
pub use relay::{
    classify, Classified, ConnectionHandle, Inbound, MessageOutcome, RelayError, RelaySettings,
    ServerMessage, SessionHandle, StreamingRelay,
};
pub use session::{SessionRegistry, SessionStats, SessionStatus};
pub use transcription::{HttpTranscriptionGateway, TranscriptionError, TranscriptionGateway};
pub use translation::{TargetLanguage, Translation, TranslationError, TranslationService};
