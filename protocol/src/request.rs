use serde::{Deserialize, Serialize};
use crate::BinCodeMessage;

/// Everything a seated client may ask of the table. Requests that are not
/// valid for the sender's seat in the current phase are silently dropped.
#[derive(Deserialize, Serialize, PartialEq, Debug)]
pub enum ClientRequest {
    Join {
        name: String,
    },
    StartRound,
    /// Opaque stroke payload from the drawer's canvas widget.
    Frame {
        bin: Vec<u8>,
    },
    Guess {
        text: String,
    },
    NextTurn,
    Reset,
}

impl BinCodeMessage<'_> for ClientRequest {}
