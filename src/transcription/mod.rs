//! Speech-to-text collaborator
//!
//! The relay only depends on the `TranscriptionGateway` trait; the HTTP
//! client for the Whisper STT service is the production implementation.

mod client;
mod error;
mod gateway;

pub use client::{HealthResponse, HttpTranscriptionGateway};
pub use error::TranscriptionError;
pub use gateway::TranscriptionGateway;
