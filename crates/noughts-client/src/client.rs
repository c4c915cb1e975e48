//! The game session client itself.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use noughts_store::TokenStore;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::protocol::{encode_move, ServerPush};
use crate::{GameConfig, GameError, GameView};

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// One open connection: the outbound half plus the task draining the
/// inbound half.
struct Session {
    client_id: u64,
    sink: SplitSink<WsStream, Message>,
    reader: JoinHandle<()>,
}

/// Client for the realtime game session.
///
/// Holds at most one open session; [`open`](Self::open) replaces any
/// existing one. Reads the access token from the shared [`TokenStore`]
/// at open time, so a refresh that lands between sessions is picked up
/// automatically.
pub struct GameClient<V: GameView> {
    config: GameConfig,
    store: TokenStore,
    view: Arc<V>,
    session: Mutex<Option<Session>>,
}

impl<V: GameView> GameClient<V> {
    /// Creates a client over the given store and view. No connection is
    /// made until [`open`](Self::open).
    pub fn new(config: GameConfig, store: TokenStore, view: Arc<V>) -> Self {
        Self {
            config,
            store,
            view,
            session: Mutex::new(None),
        }
    }

    /// Opens a session for `username`, replacing any existing one.
    ///
    /// The caller supplies the username (derived from the identity
    /// token's claims); the access token is read from the store and sent
    /// as the connection's first frame, which is the authentication
    /// handshake the server validates before pairing the player.
    pub async fn open(&self, username: &str) -> Result<(), GameError> {
        let credentials = self.store.load()?.ok_or(GameError::NotAuthenticated)?;

        self.close().await;

        // Best-effort unique id; a human cannot press "find player"
        // twice within the same millisecond.
        let client_id = wall_clock_id();
        let url = self.config.session_url(client_id, username);
        tracing::info!(client_id, username, "opening game session");

        let (ws, _) = connect_async(&url).await.map_err(GameError::Connect)?;
        let (mut sink, stream) = ws.split();

        sink.send(Message::Text(credentials.access_token.into()))
            .await
            .map_err(GameError::Send)?;

        self.view.show_user(username);

        let view = Arc::clone(&self.view);
        let reader = tokio::spawn(read_loop(stream, view));

        *self.session.lock().await = Some(Session {
            client_id,
            sink,
            reader,
        });
        Ok(())
    }

    /// Relays one move. The server is authoritative for legality and
    /// turn order; no local checks are made.
    pub async fn send_move(&self, row: u8, col: u8) -> Result<(), GameError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(GameError::NotConnected)?;
        session
            .sink
            .send(Message::Text(encode_move(row, col).into()))
            .await
            .map_err(GameError::Send)
    }

    /// Tears down the current session, if any. Idempotent.
    pub async fn close(&self) {
        if let Some(mut session) = self.session.lock().await.take() {
            session.reader.abort();
            if let Err(e) = session.sink.close().await {
                tracing::debug!(error = %e, "error closing game session");
            }
            tracing::info!(client_id = session.client_id, "game session closed");
        }
    }

    /// Whether a session is currently open.
    pub async fn connected(&self) -> bool {
        self.session.lock().await.is_some()
    }
}

/// Milliseconds since the Unix epoch, the session's client identifier.
fn wall_clock_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Drains server pushes into the view until the connection ends.
///
/// Transport errors are logged and end the loop; the session is not
/// reconnected. The player reopens with a new explicit action.
async fn read_loop<V: GameView>(mut stream: SplitStream<WsStream>, view: Arc<V>) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => dispatch_push(view.as_ref(), text.as_str()),
            Ok(Message::Close(_)) => {
                tracing::info!("game session closed by server");
                break;
            }
            Ok(_) => continue, // ping/pong/binary
            Err(e) => {
                tracing::warn!(error = %e, "game session transport error");
                break;
            }
        }
    }
}

fn dispatch_push<V: GameView>(view: &V, payload: &str) {
    match serde_json::from_str::<ServerPush>(payload) {
        Ok(ServerPush::Board {
            board,
            opponent,
            message,
        }) => {
            view.show_board(&board);
            view.show_opponent(&opponent);
            view.show_message(&message);
        }
        Ok(ServerPush::Status { message }) => view.show_message(&message),
        Err(e) => tracing::warn!(error = %e, "malformed server push ignored"),
    }
}
