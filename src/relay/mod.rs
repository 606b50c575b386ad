//! Session-scoped audio streaming relay
//!
//! The client streams recorder output as binary frames and ends each
//! recording with a `{"type":"end"}` text frame. The relay buffers the audio
//! per session, hands it to the transcription gateway exactly once per
//! recording, and pushes the result back over the same connection:
//! - `classifier`: binary/text frame → `AudioChunk` / `EndSignal` / `Ignored`
//! - `connection`: send side of a client connection
//! - `messages`: server → client wire messages
//! - `relay`: connection lifecycle and finalization

mod classifier;
mod connection;
mod messages;
#[allow(clippy::module_inception)]
mod relay;

pub use classifier::{classify, Classified, Inbound};
pub use connection::ConnectionHandle;
pub use messages::ServerMessage;
pub use relay::{MessageOutcome, RelayError, RelaySettings, SessionHandle, StreamingRelay};
