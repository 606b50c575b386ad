use std::time::Duration;
use thiserror::Error;

/// Failure of a transcription call
///
/// The `Display` text is what the client receives in the `error` message.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("no audio to transcribe")]
    EmptyAudio,

    #[error("{0}")]
    Unavailable(String),

    #[error("transcription timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("speech-to-text service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid response from speech-to-text service: {0}")]
    InvalidResponse(String),

    #[error("speech-to-text request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TranscriptionError {
    /// Map a transport error, keeping timeouts and refused connections apart
    pub(crate) fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            TranscriptionError::Timeout { after: timeout }
        } else if err.is_connect() {
            TranscriptionError::Unavailable(format!("speech-to-text service unreachable: {}", err))
        } else {
            TranscriptionError::Request(err)
        }
    }
}
