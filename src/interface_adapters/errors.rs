use std::fmt;
use tokio_tungstenite::tungstenite;

/// Every way an agent session can end badly. All of them are fatal: nothing is retried.
#[derive(Debug)]
pub enum AgentError {
    // Configuration could not be turned into a usable endpoint.
    Config(String),
    // WebSocket connection could not be established.
    Connect(tungstenite::Error),
    // Inbound payload was not JSON or lacked the fields its type requires.
    Malformed(serde_json::Error),
    // Outbound message could not be serialized.
    Encode(serde_json::Error),
    // Outbound send failed.
    Send(tungstenite::Error),
    // Transport failed while waiting for the next message.
    Receive(tungstenite::Error),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Config(message) => write!(f, "invalid configuration: {message}"),
            AgentError::Connect(err) => write!(f, "failed to connect: {err}"),
            AgentError::Malformed(err) => write!(f, "malformed server message: {err}"),
            AgentError::Encode(err) => write!(f, "failed to encode message: {err}"),
            AgentError::Send(err) => write!(f, "failed to send message: {err}"),
            AgentError::Receive(err) => write!(f, "failed to receive message: {err}"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgentError::Config(_) => None,
            AgentError::Connect(err) | AgentError::Send(err) | AgentError::Receive(err) => {
                Some(err)
            }
            AgentError::Malformed(err) | AgentError::Encode(err) => Some(err),
        }
    }
}
