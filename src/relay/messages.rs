use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Server → client message, sent as a JSON text frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after the connection is registered
    Connected {
        #[serde(rename = "sessionId")]
        session_id: String,
    },

    /// Transcript of a finished recording
    Transcription {
        text: String,
        /// Milliseconds since the Unix epoch
        timestamp: i64,
    },

    /// Transcription failure or rejected input; the connection stays open
    Error { message: String },
}

impl ServerMessage {
    pub fn connected(session_id: impl Into<String>) -> Self {
        ServerMessage::Connected {
            session_id: session_id.into(),
        }
    }

    pub fn transcription(text: impl Into<String>) -> Self {
        ServerMessage::Transcription {
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Wire name of the message, as found in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Connected { .. } => "connected",
            ServerMessage::Transcription { .. } => "transcription",
            ServerMessage::Error { .. } => "error",
        }
    }
}
