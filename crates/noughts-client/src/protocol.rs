//! The game server's wire protocol.
//!
//! Client→server frames are plain text: the access token once at open,
//! then `"<row> <col>"` per move. Server→client frames are JSON, in
//! two shapes distinguished by the presence of a `board` field.

use serde::Deserialize;

/// The 3×3 grid as the server sends it. Cell values are opaque marks
/// ("X", "O", "") that the client renders without interpretation.
pub type Board = [[String; 3]; 3];

/// A single server→client push.
///
/// Untagged: a payload with a well-formed `board` grid is a board push,
/// anything else with a `message` is a status push. The server's
/// unauthorized notice sends `board` as an empty *string*, which fails
/// the grid shape and lands in [`ServerPush::Status`] as intended.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ServerPush {
    /// Full board replacement plus the opponent label and a message.
    Board {
        board: Board,
        opponent: String,
        message: String,
    },
    /// Message-only push; board and opponent keep their last value.
    Status { message: String },
}

/// Encodes a move as the server expects it: two space-separated
/// integers, nothing else.
pub fn encode_move(row: u8, col: u8) -> String {
    format!("{row} {col}")
}
