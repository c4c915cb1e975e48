//! OAuth2 token lifecycle management for the noughts client.
//!
//! This crate drives the full credential lifecycle against a hosted
//! identity provider:
//!
//! 1. **Acquisition** — exchanging a one-time authorization code for a
//!    credential set ([`TokenLifecycle::exchange_code`])
//! 2. **Renewal** — silent refresh via the stored refresh token
//!    ([`TokenLifecycle::refresh`]), proactively re-armed five minutes
//!    before expiry ([`TokenLifecycle::schedule_refresh`])
//! 3. **Teardown** — logout, which clears credentials, cancels any
//!    pending refresh, and navigates to the provider's logout endpoint
//!
//! Refresh failure is non-recoverable: it forces a logout
//! rather than retrying, because a rejected refresh token means the
//! session is dead and every later attempt would fail the same way.
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)      ← bootstrap, user-originated login/logout
//!     ↕
//! Lifecycle (this crate)   ← exchange, refresh, scheduling, logout
//!     ↕
//! Store layer (below)      ← durable credential persistence
//! ```
//!
//! Rendering is pushed through the [`AuthView`] trait so the lifecycle
//! logic stays independent of any particular UI.

mod config;
mod endpoint;
mod error;
mod lifecycle;
mod state;
mod view;

pub use config::OAuthConfig;
pub use endpoint::TokenResponse;
pub use error::AuthError;
pub use lifecycle::{refresh_delay, TokenLifecycle, REFRESH_MARGIN_SECS};
pub use state::AuthState;
pub use view::AuthView;
