use super::error::TranscriptionError;

/// Speech-to-text collaborator used by the relay
///
/// Implementations:
/// - `HttpTranscriptionGateway`: the Whisper STT service over HTTP
/// - test doubles that script results and count calls
#[async_trait::async_trait]
pub trait TranscriptionGateway: Send + Sync {
    /// Transcribe one assembled recording
    ///
    /// Returns the transcript, possibly empty. May take tens of seconds;
    /// callers bound it with their own timeout.
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, TranscriptionError>;

    /// Gateway name for logging
    fn name(&self) -> &str;
}
