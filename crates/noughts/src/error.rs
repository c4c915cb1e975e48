//! Unified error type across the crates.

use noughts_auth::AuthError;
use noughts_client::GameError;
use noughts_store::StoreError;

/// Any error the noughts stack can produce, for callers that do not
/// care which layer it came from.
#[derive(Debug, thiserror::Error)]
pub enum NoughtsError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
