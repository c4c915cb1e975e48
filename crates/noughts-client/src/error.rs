//! Error types for the game session client.

use noughts_store::StoreError;
use tokio_tungstenite::tungstenite;

/// Errors the game session client can produce.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No access token is stored, so the authentication handshake
    /// cannot be performed.
    #[error("no stored access token - log in before opening a session")]
    NotAuthenticated,

    /// The WebSocket connection could not be established.
    #[error("failed to connect to game server: {0}")]
    Connect(#[source] tungstenite::Error),

    /// A frame could not be written to an established connection.
    #[error("failed to send on game session: {0}")]
    Send(#[source] tungstenite::Error),

    /// An operation needed an open session and there is none.
    #[error("no active game session")]
    NotConnected,

    /// The credential store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}
