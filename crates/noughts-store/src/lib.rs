//! Durable credential persistence for the noughts client.
//!
//! The identity provider hands the client four values (access token,
//! refresh token, identity token, expiry). They live and die together:
//! a half-written credential set is worse than none, because the refresh
//! path would run with a token that was never granted. This crate owns
//! that all-or-nothing lifecycle:
//!
//! - [`CredentialSet`] — the four fields, serialized in the exact
//!   key/value shape the browser build persisted to web storage.
//! - [`TokenStore`] — a file-backed store with atomic replace semantics.
//! - [`StoreError`] — what can go wrong while reading or writing.
//!
//! # How it fits in the stack
//!
//! ```text
//! Lifecycle layer (above)  ← sole writer: exchange, refresh, logout
//!     ↕
//! Store layer (this crate) ← persistence, atomicity
//!     ↕
//! Filesystem (below)
//! ```

mod credentials;
mod error;
mod store;

pub use credentials::CredentialSet;
pub use error::StoreError;
pub use store::TokenStore;
