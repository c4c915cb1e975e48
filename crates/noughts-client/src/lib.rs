//! Realtime game session client.
//!
//! Manages the single WebSocket connection a player holds against the
//! game server: opens it, authenticates it by sending the access token
//! as the very first frame, relays moves out, and feeds server pushes
//! into the presentation layer.
//!
//! How it fits in the stack:
//!
//! ```text
//!   noughts-auth ──writes──▶ noughts-store ──reads──▶ noughts-client
//!                                                          │
//!                                                     GameView impl
//! ```
//!
//! The client is a thin relay. It performs no move legality checks and
//! never interprets board cells — the server is authoritative for all
//! game rules. A closed or failed session is not reconnected; reopening
//! takes a new explicit call to [`GameClient::open`].

mod client;
mod config;
mod error;
mod protocol;
mod view;

pub use client::GameClient;
pub use config::GameConfig;
pub use error::GameError;
pub use protocol::{encode_move, Board, ServerPush};
pub use view::GameView;
