// Wire protocol DTOs and conversions for the simulation server's JSON messages.

use crate::domain::{Coord, Position};
use crate::use_cases::{AgentCommand, ServerEvent};
use serde::{Deserialize, Serialize, de::Error as _};
use serde_json::Value;

pub const PROTOCOL_VERSION: &str = "0.2.0";

/// Messages the agent sends to the server over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    // Handshake, sent once right after connecting.
    Hello { version: String, agent: String },
    // Command for the controlled player. `seq` is client-assigned.
    Intent { seq: u64, data: IntentDto },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum IntentDto {
    MoveTo { x: CoordDto, y: CoordDto },
}

impl From<AgentCommand> for ClientMessage {
    fn from(command: AgentCommand) -> Self {
        match command {
            AgentCommand::Hello { agent } => ClientMessage::Hello {
                version: PROTOCOL_VERSION.to_string(),
                agent,
            },
            AgentCommand::MoveTo { seq, target } => ClientMessage::Intent {
                seq,
                data: IntentDto::MoveTo {
                    x: target.x.into(),
                    y: target.y.into(),
                },
            },
        }
    }
}

/// JSON number as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordDto {
    Int(i64),
    Float(f64),
}

impl From<CoordDto> for Coord {
    fn from(coord: CoordDto) -> Self {
        match coord {
            CoordDto::Int(value) => Coord::Int(value),
            CoordDto::Float(value) => Coord::Float(value),
        }
    }
}

impl From<Coord> for CoordDto {
    fn from(coord: Coord) -> Self {
        match coord {
            Coord::Int(value) => CoordDto::Int(value),
            Coord::Float(value) => CoordDto::Float(value),
        }
    }
}

// Only the path the agent reads; everything else in a state broadcast is ignored.
#[derive(Debug, Deserialize)]
struct StateMessageDto {
    data: StateDataDto,
}

#[derive(Debug, Deserialize)]
struct StateDataDto {
    player: PlayerDto,
}

#[derive(Debug, Deserialize)]
struct PlayerDto {
    // Only the first two entries are read.
    pos: Vec<Value>,
}

impl PlayerDto {
    fn position(&self) -> Result<Position, serde_json::Error> {
        let [x, y, ..] = self.pos.as_slice() else {
            return Err(serde_json::Error::custom(format!(
                "player pos needs two coordinates, got {}",
                self.pos.len()
            )));
        };
        let x = CoordDto::deserialize(x)?;
        let y = CoordDto::deserialize(y)?;
        Ok(Position::new(x.into(), y.into()))
    }
}

/// Decode one inbound frame.
///
/// Invalid JSON or a top-level value that is not an object is an error, as is a `state`
/// message without two numbers at the start of `data.player.pos`. Any other object decodes
/// to an informational event.
pub fn decode_server_message(payload: &[u8]) -> Result<ServerEvent, serde_json::Error> {
    let value: Value = serde_json::from_slice(payload)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("server message is not a json object"));
    }
    let kind = value.get("type").and_then(Value::as_str).map(str::to_owned);

    let event = match kind.as_deref() {
        Some("state") => {
            let state = StateMessageDto::deserialize(&value)?;
            ServerEvent::State {
                player_pos: state.data.player.position()?,
            }
        }
        Some("hello") => ServerEvent::Hello {
            version: str_field(&value, "version"),
        },
        Some("ack") => ServerEvent::Ack {
            seq: u64_field(&value, "seq"),
            tick: u64_field(&value, "tick"),
        },
        Some("error") => match str_field(&value, "reason") {
            Some(reason) => ServerEvent::Error {
                seq: u64_field(&value, "seq"),
                reason,
            },
            None => ServerEvent::Unknown { kind },
        },
        _ => ServerEvent::Unknown { kind },
    };

    Ok(event)
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn u64_field(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}
