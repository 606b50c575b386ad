//! Per-connection recording sessions
//!
//! This module provides the state the relay keeps for each WebSocket connection:
//! - `ChunkSink`: ordered buffer of binary audio chunks for the current recording
//! - `Session`: recording status machine (Active → Finalizing → Finalized)
//! - `SessionRegistry`: session id → live session, shared across connections
//! - `SessionStats`: snapshot served by the inspection endpoint

mod registry;
mod session;
mod sink;
mod stats;

pub use registry::{RegistryError, SessionRegistry, SharedSession};
pub use session::{Session, SessionStatus};
pub use sink::{Assembled, ChunkSink};
pub use stats::SessionStats;
