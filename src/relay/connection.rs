use super::messages::ServerMessage;
use tokio::sync::mpsc;

/// Send side of one client connection
///
/// The WebSocket writer task owns the receiving end and forwards every
/// message as a text frame. Once that task stops, because the socket closed,
/// the handle reports itself closed and `push` becomes a no-op. Clones can be
/// held by in-flight work that outlives the session's registry entry.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ConnectionHandle {
    /// Create a handle together with the receiver the writer task drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Queue a message for the client
    ///
    /// Returns `false` when the connection is already gone; the message is
    /// discarded in that case.
    pub fn push(&self, message: ServerMessage) -> bool {
        if !self.is_open() {
            return false;
        }

        self.tx.send(message).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_delivers_in_order() {
        let (connection, mut rx) = ConnectionHandle::channel();

        assert!(connection.push(ServerMessage::connected("s-1")));
        assert!(connection.push(ServerMessage::error("boom")));

        assert_eq!(rx.try_recv().unwrap(), ServerMessage::connected("s-1"));
        assert_eq!(rx.try_recv().unwrap(), ServerMessage::error("boom"));
    }

    #[test]
    fn test_push_after_receiver_dropped_is_discarded() {
        let (connection, rx) = ConnectionHandle::channel();
        let late = connection.clone();
        drop(rx);

        assert!(!late.is_open());
        assert!(!late.push(ServerMessage::transcription("too late")));
    }
}
