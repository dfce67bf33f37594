use serde::{Serialize, Deserialize};
use crate::BinCodeMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    Playing,
    RoundOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub score: i32,
}

/// Everything a client needs to render, minus the secret word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// Join order. The drawer is `players[drawer]`.
    pub players: Vec<PlayerEntry>,
    pub drawer: u8,
    pub guesses_left: u8,
    pub last_outcome: String,
    /// Bumped on every drawing update so viewers know to redraw.
    pub revision: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerResponse {
    Snapshot(Snapshot),
    /// Sent to the drawer only.
    Secret {
        word: String,
    },
    Frame {
        bin: Vec<u8>,
        revision: u64,
    },
    Notice {
        msg: String,
    },
    TableFull,
}

impl BinCodeMessage<'_> for ServerResponse {}
