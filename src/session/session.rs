use super::sink::{Assembled, ChunkSink};
use super::stats::SessionStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle of the recording currently held by a session
///
/// `Active → Finalizing → Finalized`. Audio is only accepted while `Active`;
/// the transition out of `Active` happens once per recording, on the first
/// end-signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Receiving audio chunks
    Active,
    /// End-signal received, transcription in flight
    Finalizing,
    /// Result (or error) delivered; waiting for the next recording or close
    Finalized,
}

/// State kept for one WebSocket connection
#[derive(Debug)]
pub struct Session {
    /// Session identifier (client-supplied header or generated)
    id: String,

    /// Status of the current recording
    status: SessionStatus,

    /// Audio buffered for the current recording
    sink: ChunkSink,

    /// When the connection was opened
    started_at: DateTime<Utc>,

    /// Number of recordings that reached `Finalized` on this connection
    recordings_completed: usize,
}

impl Session {
    pub fn new(id: String) -> Self {
        Self {
            id,
            status: SessionStatus::Active,
            sink: ChunkSink::new(),
            started_at: Utc::now(),
            recordings_completed: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn buffered_chunks(&self) -> usize {
        self.sink.chunk_count()
    }

    pub fn buffered_bytes(&self) -> usize {
        self.sink.total_bytes()
    }

    pub fn recordings_completed(&self) -> usize {
        self.recordings_completed
    }

    /// Buffer an audio chunk
    ///
    /// Returns `false` and drops the chunk when the session is not `Active`.
    pub fn append_chunk(&mut self, chunk: Vec<u8>) -> bool {
        if self.status != SessionStatus::Active {
            return false;
        }

        self.sink.push(chunk);
        true
    }

    /// Open a new recording after the previous one was finalized
    ///
    /// Only `Finalized → Active` is allowed; a recording still in flight is
    /// never reopened.
    pub fn reopen(&mut self) -> bool {
        if self.status != SessionStatus::Finalized {
            return false;
        }

        debug!("Session {} starting recording #{}", self.id, self.recordings_completed + 1);
        self.status = SessionStatus::Active;
        self.sink.clear();
        true
    }

    /// Close intake and hand out the buffered audio
    ///
    /// Moves `Active → Finalizing` and returns the assembled recording. Any
    /// other status returns `None`, which makes repeated end-signals no-ops.
    /// The chunk buffer is released here, so nothing is kept around while
    /// transcription runs.
    pub fn begin_finalize(&mut self) -> Option<Assembled> {
        if self.status != SessionStatus::Active {
            return None;
        }

        self.status = SessionStatus::Finalizing;
        Some(self.sink.drain())
    }

    /// Mark the current recording as finished
    pub fn complete_finalize(&mut self) {
        if self.status == SessionStatus::Finalizing {
            self.status = SessionStatus::Finalized;
            self.recordings_completed += 1;
        }
    }

    /// Snapshot for the inspection endpoint
    pub fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            session_id: self.id.clone(),
            status: self.status,
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            buffered_chunks: self.sink.chunk_count(),
            buffered_bytes: self.sink.total_bytes(),
            recordings_completed: self.recordings_completed,
        }
    }
}
