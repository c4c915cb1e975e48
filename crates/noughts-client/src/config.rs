//! Game server connection configuration.

/// Where the realtime game server lives.
///
/// The session endpoint is fixed by the server's routing scheme:
/// `wss://<host>:<port>/game/ws/<client_id>/<username>`.
#[derive(Debug, Clone)]
pub struct GameConfig {
    host: String,
    port: u16,
    use_tls: bool,
}

impl GameConfig {
    /// Production defaults: TLS on port 8080.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 8080,
            use_tls: true,
        }
    }

    /// Overrides the game server port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Connects over plain `ws://` instead of `wss://`. Test servers
    /// and local development only.
    pub fn without_tls(mut self) -> Self {
        self.use_tls = false;
        self
    }

    /// The full connection target for one `(client_id, username)` session.
    pub fn session_url(&self, client_id: u64, username: &str) -> String {
        let scheme = if self.use_tls { "wss" } else { "ws" };
        format!(
            "{scheme}://{}:{}/game/ws/{client_id}/{username}",
            self.host, self.port
        )
    }
}
