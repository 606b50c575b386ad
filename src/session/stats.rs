use super::session::SessionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: String,

    /// Status of the current recording
    pub status: SessionStatus,

    /// When the connection was opened
    pub started_at: DateTime<Utc>,

    /// Connection age in seconds
    pub duration_secs: f64,

    /// Audio chunks buffered for the current recording
    pub buffered_chunks: usize,

    /// Audio bytes buffered for the current recording
    pub buffered_bytes: usize,

    /// Recordings finalized on this connection
    pub recordings_completed: usize,
}
