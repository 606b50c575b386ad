// Inbound frame classification
//
// One WebSocket carries both the recorder's binary audio and the client's
// JSON control frames. Classification happens once, up front, so the relay's
// state machine only ever sees `AudioChunk`, `EndSignal` or `Ignored`.

use serde::Deserialize;

/// Raw data frame received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Binary(Vec<u8>),
    Text(String),
}

/// What the relay should do with an inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Recorder output to buffer
    AudioChunk(Vec<u8>),
    /// Client stopped recording; finalize the buffered audio
    EndSignal,
    /// Unparsable or unknown text frame; dropped silently
    Ignored,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ControlKind {
    #[serde(alias = "end-of-stream", alias = "end_of_stream")]
    End,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct ControlFrame {
    #[serde(rename = "type")]
    kind: ControlKind,
}

/// Classify one inbound frame
///
/// Binary frames are always audio. Text frames are parsed as a control
/// object; a parse failure is an ordinary outcome and yields `Ignored`.
pub fn classify(message: Inbound) -> Classified {
    match message {
        Inbound::Binary(bytes) => Classified::AudioChunk(bytes),
        Inbound::Text(text) => match serde_json::from_str::<ControlFrame>(&text) {
            Ok(ControlFrame {
                kind: ControlKind::End,
            }) => Classified::EndSignal,
            Ok(ControlFrame {
                kind: ControlKind::Unknown,
            })
            | Err(_) => Classified::Ignored,
        },
    }
}
