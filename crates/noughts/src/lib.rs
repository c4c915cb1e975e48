//! Noughts: a two-player noughts-and-crosses client, the way a browser
//! single-page app would be structured.
//!
//! The crate ties two state machines together:
//!
//! - the **token lifecycle** ([`noughts_auth`]): authorization-code
//!   exchange, silent refresh, proactive renewal, forced logout;
//! - the **game session** ([`noughts_client`]): one WebSocket
//!   connection, authenticated by sending the access token as its first
//!   frame, relaying moves and rendering server pushes.
//!
//! They share a [`noughts_store::TokenStore`]: the lifecycle writes
//! credentials, the session reads the access token at open time.
//!
//! [`bootstrap`] is the page-load entry point: it runs the exchange or
//! silent-refresh path depending on whether an authorization code is
//! present, and leaves the view rendered accordingly.

mod bootstrap;
mod error;

pub use bootstrap::bootstrap;
pub use error::NoughtsError;

pub use noughts_auth as auth;
pub use noughts_client as client;
pub use noughts_store as store;
pub use noughts_token as token;

/// Everything a typical consumer needs.
pub mod prelude {
    pub use crate::bootstrap;
    pub use crate::NoughtsError;
    pub use noughts_auth::{AuthError, AuthState, AuthView, OAuthConfig, TokenLifecycle};
    pub use noughts_client::{Board, GameClient, GameConfig, GameError, GameView};
    pub use noughts_store::{CredentialSet, TokenStore};
    pub use noughts_token::username_of;
}
