//! Error types for the token lifecycle layer.

use noughts_store::StoreError;

/// Errors that can occur during the token lifecycle.
///
/// The two grant failures are deliberately separate variants because
/// they have different recovery policies: an exchange failure falls back
/// to silent refresh, while a refresh failure forces a logout.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The authorization-code exchange failed (non-success status or
    /// transport failure). The caller falls back to silent refresh and,
    /// failing that, the anonymous view.
    #[error("code exchange failed: {0}")]
    Exchange(String),

    /// The refresh-token exchange failed. Non-recoverable: the lifecycle
    /// manager has already forced a logout by the time this surfaces.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    /// The credential store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}
