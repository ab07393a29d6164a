//! JSON messages exchanged between a presentation layer and whoever owns the [`GameSession`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilematch_core::*;

pub use dispatch::*;

mod dispatch;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Commands accepted from a client, one per line on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Start { difficulty: Difficulty },
    Restart,
    ChangeDifficulty { difficulty: Difficulty },
    Activate { x: Coord, y: Coord },
    Tick { generation: Generation },
    Snapshot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Snapshot {
        snapshot: SessionSnapshot,
    },
    Started {
        generation: Generation,
        snapshot: SessionSnapshot,
    },
    Turn {
        outcome: ActivateOutcome,
        snapshot: SessionSnapshot,
    },
    Tick {
        outcome: TickOutcome,
        time_remaining: u32,
        state: SessionState,
    },
    Error {
        message: String,
    },
}

pub fn decode_client(line: &str) -> Result<ClientMessage> {
    Ok(serde_json::from_str(line.trim())?)
}

pub fn encode_client(message: &ClientMessage) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode_server(line: &str) -> Result<ServerMessage> {
    Ok(serde_json::from_str(line.trim())?)
}

pub fn encode_server(message: &ServerMessage) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}
