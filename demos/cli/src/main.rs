//! Terminal front-end for the noughts stack.
//!
//! Plays the part the browser page plays in production: it provides the
//! view implementations, runs the bootstrap flow, and turns typed
//! commands into session actions.
//!
//! Configuration comes from the environment:
//!
//! ```text
//! NOUGHTS_CLIENT_ID        OAuth2 client id                   (required)
//! NOUGHTS_TOKEN_URL        token endpoint URL                 (required)
//! NOUGHTS_LOGOUT_ENDPOINT  provider logout page URL           (required)
//! NOUGHTS_REDIRECT_URI     registered redirect URI            (required)
//! NOUGHTS_LOGOUT_URI       post-logout landing URI            (required)
//! NOUGHTS_GAME_HOST        game server host                   (required)
//! NOUGHTS_GAME_PORT        game server port                   (default 8080)
//! NOUGHTS_NO_TLS           set to connect over plain ws://
//! NOUGHTS_CODE             authorization code from a redirect (optional)
//! NOUGHTS_TOKENS           token store path  (default noughts-tokens.json)
//! ```

use std::env;
use std::error::Error;
use std::sync::Arc;

use noughts::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use url::Url;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Renders everything to stdout. Stands in for the DOM.
struct Terminal;

impl AuthView for Terminal {
    fn render_authenticated(&self) {
        println!("[auth] logged in - type 'find' to look for an opponent");
    }

    fn render_anonymous(&self) {
        println!("[auth] not logged in - visit your provider's login page");
    }

    fn navigate(&self, url: &str) {
        println!("[auth] session ended - continue at {url}");
    }
}

impl GameView for Terminal {
    fn show_user(&self, username: &str) {
        println!("[game] playing as {username}");
    }

    fn show_opponent(&self, opponent: &str) {
        println!("[game] opponent: {opponent}");
    }

    fn show_board(&self, board: &Board) {
        for (i, row) in board.iter().enumerate() {
            let cells: Vec<&str> = row
                .iter()
                .map(|c| if c.is_empty() { " " } else { c.as_str() })
                .collect();
            println!("  {} | {} | {}", cells[0], cells[1], cells[2]);
            if i < 2 {
                println!(" ---+---+---");
            }
        }
    }

    fn show_message(&self, message: &str) {
        println!("[game] {message}");
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn required(name: &str) -> Result<String, Box<dyn Error>> {
    env::var(name).map_err(|_| format!("{name} must be set").into())
}

fn required_url(name: &str) -> Result<Url, Box<dyn Error>> {
    Ok(required(name)?.parse::<Url>()?)
}

fn oauth_config() -> Result<OAuthConfig, Box<dyn Error>> {
    Ok(OAuthConfig::new(
        required("NOUGHTS_CLIENT_ID")?,
        required_url("NOUGHTS_TOKEN_URL")?,
        required_url("NOUGHTS_LOGOUT_ENDPOINT")?,
        required_url("NOUGHTS_REDIRECT_URI")?,
        required_url("NOUGHTS_LOGOUT_URI")?,
    ))
}

fn game_config() -> Result<GameConfig, Box<dyn Error>> {
    let mut config = GameConfig::new(required("NOUGHTS_GAME_HOST")?);
    if let Ok(port) = env::var("NOUGHTS_GAME_PORT") {
        config = config.with_port(port.parse()?);
    }
    if env::var("NOUGHTS_NO_TLS").is_ok() {
        config = config.without_tls();
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command loop
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = TokenStore::new(
        env::var("NOUGHTS_TOKENS").unwrap_or_else(|_| "noughts-tokens.json".into()),
    );
    let view = Arc::new(Terminal);

    let lifecycle = TokenLifecycle::new(oauth_config()?, store.clone(), Arc::clone(&view));
    let game = GameClient::new(game_config()?, store.clone(), Arc::clone(&view));

    let code = env::var("NOUGHTS_CODE").ok();
    bootstrap(&lifecycle, code.as_deref()).await;

    println!("commands: find | move <row> <col> | logout | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["find"] => {
                let username = store
                    .load()?
                    .and_then(|c| username_of(&c.id_token));
                match username {
                    Some(username) => {
                        if let Err(e) = game.open(&username).await {
                            println!("[game] could not open a session: {e}");
                        }
                    }
                    None => println!("[game] no identity - log in first"),
                }
            }
            ["move", row, col] => match (row.parse(), col.parse()) {
                (Ok(row), Ok(col)) => {
                    if let Err(e) = game.send_move(row, col).await {
                        println!("[game] move not sent: {e}");
                    }
                }
                _ => println!("usage: move <row> <col>"),
            },
            ["logout"] => {
                game.close().await;
                lifecycle.logout().await;
            }
            ["quit"] => break,
            [] => {}
            _ => println!("commands: find | move <row> <col> | logout | quit"),
        }
    }

    game.close().await;
    Ok(())
}
