// Use-case level inputs/outputs for the agent session.

use crate::domain::Position;

/// Decoded server message, reduced to what the agent can react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    State { player_pos: Position },
    Hello { version: Option<String> },
    Ack { seq: Option<u64>, tick: Option<u64> },
    Error { seq: Option<u64>, reason: String },
    // Missing or unrecognized `type`.
    Unknown { kind: Option<String> },
}

impl ServerEvent {
    pub fn kind(&self) -> &str {
        match self {
            ServerEvent::State { .. } => "state",
            ServerEvent::Hello { .. } => "hello",
            ServerEvent::Ack { .. } => "ack",
            ServerEvent::Error { .. } => "error",
            ServerEvent::Unknown { kind } => kind.as_deref().unwrap_or("<none>"),
        }
    }
}

/// Something the agent wants sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCommand {
    Hello { agent: String },
    MoveTo { seq: u64, target: Position },
}
