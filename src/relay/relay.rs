use super::classifier::{classify, Classified, Inbound};
use super::connection::ConnectionHandle;
use super::messages::ServerMessage;
use crate::config::RelayConfig;
use crate::session::{
    Assembled, RegistryError, SessionRegistry, SessionStatus, SharedSession,
};
use crate::transcription::{TranscriptionError, TranscriptionGateway};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Limits applied by the relay to every session
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Upper bound on one transcription call
    pub transcription_timeout: Duration,
    /// Largest recording buffered per session
    pub max_recording_bytes: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from(&RelayConfig::default())
    }
}

impl From<&RelayConfig> for RelaySettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            transcription_timeout: Duration::from_secs(config.transcription_timeout_secs),
            max_recording_bytes: config.max_recording_bytes,
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("recording exceeds the {limit} byte limit; audio chunk dropped")]
    RecordingTooLarge { limit: usize },
}

/// What `on_message` did with a frame
#[derive(Debug)]
pub enum MessageOutcome {
    /// Audio chunk buffered
    Appended,
    /// Frame arrived while the recording was not accepting input
    Dropped,
    /// Text frame that is not a recognised control message
    Ignored,
    /// End-signal with no buffered audio; recording finished without a call
    FinalizeSkipped,
    /// End-signal accepted; transcription runs on the returned task
    FinalizeStarted(JoinHandle<()>),
}

/// One connection's view of its session
///
/// Holds the session and the connection directly, so late results never
/// need to look the session up again by id.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    session: SharedSession,
    connection: ConnectionHandle,
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn connection(&self) -> &ConnectionHandle {
        &self.connection
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.lock().await.status()
    }

    /// Surface a message-handling error to the client
    pub fn report(&self, err: &RelayError) -> bool {
        warn!("Session {}: {}", self.id, err);
        self.connection.push(ServerMessage::error(err.to_string()))
    }
}

/// Session-scoped audio streaming relay
///
/// Per connection: `on_connect` once, `on_message` for every data frame in
/// arrival order, `on_close` once. Finalization runs on its own task so
/// other frames, and other sessions, are never blocked by the STT service.
#[derive(Clone)]
pub struct StreamingRelay {
    registry: SessionRegistry,
    gateway: Arc<dyn TranscriptionGateway>,
    settings: RelaySettings,
}

impl StreamingRelay {
    pub fn new(
        registry: SessionRegistry,
        gateway: Arc<dyn TranscriptionGateway>,
        settings: RelaySettings,
    ) -> Self {
        info!(
            "Relay using {} gateway (timeout {:?}, max recording {} bytes)",
            gateway.name(),
            settings.transcription_timeout,
            settings.max_recording_bytes
        );

        Self {
            registry,
            gateway,
            settings,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Register a session for a new connection and acknowledge it
    ///
    /// Uses `supplied_id` when present and free; on a collision a fresh id
    /// is generated instead of failing the connection.
    pub async fn on_connect(
        &self,
        supplied_id: Option<String>,
        connection: ConnectionHandle,
    ) -> SessionHandle {
        let mut id = supplied_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_session_id);

        let session = loop {
            match self.registry.create(&id).await {
                Ok(session) => break session,
                Err(RegistryError::Collision { session_id }) => {
                    warn!("Session id {} already in use, generating a new one", session_id);
                    id = generate_session_id();
                }
            }
        };

        info!("New relay connection: {}", id);
        connection.push(ServerMessage::connected(id.clone()));

        SessionHandle {
            id,
            session,
            connection,
        }
    }

    /// Route one inbound frame
    pub async fn on_message(
        &self,
        handle: &SessionHandle,
        message: Inbound,
    ) -> Result<MessageOutcome, RelayError> {
        let mut session = handle.session.lock().await;

        match classify(message) {
            Classified::Ignored => {
                debug!("Session {}: ignoring unrecognised text frame", handle.id);
                Ok(MessageOutcome::Ignored)
            }

            Classified::AudioChunk(chunk) => {
                // A finished recording makes room for the next one
                session.reopen();

                if session.status() != SessionStatus::Active {
                    debug!(
                        "Session {}: dropping {} bytes received while {:?}",
                        handle.id,
                        chunk.len(),
                        session.status()
                    );
                    return Ok(MessageOutcome::Dropped);
                }

                let limit = self.settings.max_recording_bytes;
                if session.buffered_bytes() + chunk.len() > limit {
                    return Err(RelayError::RecordingTooLarge { limit });
                }

                session.append_chunk(chunk);
                Ok(MessageOutcome::Appended)
            }

            Classified::EndSignal => {
                let chunk_count = session.buffered_chunks();

                let Some(assembled) = session.begin_finalize() else {
                    debug!(
                        "Session {}: end-signal ignored while {:?}",
                        handle.id,
                        session.status()
                    );
                    return Ok(MessageOutcome::Dropped);
                };

                match assembled {
                    Assembled::Empty => {
                        info!("Session {}: end-signal with no audio, nothing to transcribe", handle.id);
                        session.complete_finalize();
                        Ok(MessageOutcome::FinalizeSkipped)
                    }
                    Assembled::Audio(audio) => {
                        info!(
                            "Session {}: end-signal received, finalizing {} chunks ({} bytes)",
                            handle.id,
                            chunk_count,
                            audio.len()
                        );

                        let task = tokio::spawn(finalize(
                            Arc::clone(&self.gateway),
                            handle.clone(),
                            audio,
                            self.settings.transcription_timeout,
                        ));

                        Ok(MessageOutcome::FinalizeStarted(task))
                    }
                }
            }
        }
    }

    /// Forget the session; in-flight transcription is left to finish
    pub async fn on_close(&self, handle: &SessionHandle) {
        let released = self.registry.release(&handle.id, &handle.session).await;
        let status = handle.status().await;

        if released {
            info!("Connection closed: {} ({:?})", handle.id, status);
        } else {
            warn!("Connection closed: {} was not registered", handle.id);
        }
    }
}

/// Transcribe one recording and deliver the outcome
async fn finalize(
    gateway: Arc<dyn TranscriptionGateway>,
    handle: SessionHandle,
    audio: Vec<u8>,
    timeout: Duration,
) {
    let started = Instant::now();

    let result = match tokio::time::timeout(timeout, gateway.transcribe(audio)).await {
        Ok(result) => result,
        Err(_) => Err(TranscriptionError::Timeout { after: timeout }),
    };

    let reply = match result {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                warn!("Session {}: transcription came back empty", handle.id);
                None
            } else {
                info!(
                    "Session {}: transcribed {} characters in {}ms",
                    handle.id,
                    text.len(),
                    started.elapsed().as_millis()
                );
                Some(ServerMessage::transcription(text))
            }
        }
        Err(e) => {
            error!("Session {}: transcription failed: {}", handle.id, e);
            Some(ServerMessage::error(e.to_string()))
        }
    };

    // Finalized and pushed under one lock, so the next recording's first
    // chunk always sees the finished state.
    let mut session = handle.session.lock().await;
    session.complete_finalize();

    if let Some(reply) = reply {
        let kind = reply.kind();
        if !handle.connection.push(reply) {
            warn!(
                "Session {}: connection closed, {} result discarded",
                handle.id, kind
            );
        }
    }
}

fn generate_session_id() -> String {
    format!("session-{}", uuid::Uuid::new_v4())
}
