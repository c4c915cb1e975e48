//! The token lifecycle manager: acquisition, proactive renewal, logout.

use std::sync::{Arc, Weak};
use std::time::Duration;

use noughts_store::{CredentialSet, TokenStore};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

use crate::endpoint::TokenEndpoint;
use crate::{AuthError, AuthState, AuthView, OAuthConfig};

/// How many seconds before expiry a refresh is attempted.
///
/// Refreshing five minutes early tolerates clock skew and network
/// latency without ever presenting an expired token to the server.
pub const REFRESH_MARGIN_SECS: u64 = 300;

/// The delay before a scheduled refresh fires for a token with the given
/// lifetime. Lifetimes shorter than the margin refresh immediately.
pub fn refresh_delay(expires_in: u64) -> Duration {
    Duration::from_secs(expires_in.saturating_sub(REFRESH_MARGIN_SECS))
}

/// Orchestrates the credential lifecycle for one session.
///
/// Owns the sole write path to the [`TokenStore`] and at most one
/// pending refresh task. Constructed as an `Arc` because the background
/// refresh task holds a handle back into the manager.
///
/// ## Lifecycle
///
/// ```text
/// exchange_code() ──→ [Authenticated] ──→ scheduled refresh ──┐
///        │                   ↑                                │
///        │                   └──────────(success)─────────────┤
///   (failure)                                            (failure)
///        │                                                    │
///        ▼                                                    ▼
///    refresh() ──(failure)──→ logout() ──→ navigate(logout URL)
/// ```
pub struct TokenLifecycle<V: AuthView> {
    endpoint: TokenEndpoint,
    store: TokenStore,
    view: Arc<V>,
    logout_url: Url,
    state: Mutex<AuthState>,
    /// The single pending refresh task. Arming a new one supersedes
    /// (aborts) whatever was here; logout takes and aborts it.
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    /// Handle back to the owning `Arc`, for the spawned refresh task.
    weak: Weak<Self>,
}

impl<V: AuthView> TokenLifecycle<V> {
    /// Creates a lifecycle manager over the given store and view.
    pub fn new(config: OAuthConfig, store: TokenStore, view: Arc<V>) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            logout_url: config.logout_url(),
            endpoint: TokenEndpoint::new(config),
            store,
            view,
            state: Mutex::new(AuthState::Unauthenticated),
            refresh_task: Mutex::new(None),
            weak: weak.clone(),
        })
    }

    /// The current lifecycle state.
    pub async fn state(&self) -> AuthState {
        *self.state.lock().await
    }

    /// The credential store this manager writes to.
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Whether a proactive refresh is currently armed.
    pub async fn refresh_scheduled(&self) -> bool {
        self.refresh_task.lock().await.is_some()
    }

    /// Exchanges a one-time authorization code for a credential set.
    ///
    /// On success the set is persisted atomically and a proactive
    /// refresh is armed. On failure nothing is stored and the caller is
    /// expected to fall back to [`refresh`](Self::refresh).
    pub async fn exchange_code(&self, code: &str) -> Result<CredentialSet, AuthError> {
        self.transition(AuthState::Exchanging).await;

        let response = match self.endpoint.exchange_code(code).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "authorization-code exchange failed");
                self.transition(AuthState::Unauthenticated).await;
                return Err(e);
            }
        };

        let credentials = CredentialSet {
            access_token: response.access_token,
            refresh_token: response.refresh_token.unwrap_or_default(),
            id_token: response.id_token,
            expires_in: response.expires_in,
        };
        self.store.save(&credentials)?;
        self.transition(AuthState::Authenticated).await;

        tracing::info!(
            username = ?noughts_token::username_of(&credentials.id_token),
            expires_in = credentials.expires_in,
            "credentials acquired"
        );

        self.schedule_refresh().await;
        Ok(credentials)
    }

    /// Exchanges the stored refresh token for fresh access/identity
    /// tokens, preserving the refresh token itself.
    ///
    /// Failure is non-recoverable: the manager forces a logout (clears
    /// credentials and navigates to the logout endpoint) before the
    /// error is returned. Never retried.
    pub async fn refresh(&self) -> Result<CredentialSet, AuthError> {
        match self.refresh_inner().await {
            Ok(credentials) => {
                self.schedule_refresh().await;
                Ok(credentials)
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed - forcing logout");
                self.logout().await;
                Err(e)
            }
        }
    }

    /// The refresh exchange itself, without re-arming or logout policy.
    /// The scheduled task uses this directly so it can keep its own loop.
    async fn refresh_inner(&self) -> Result<CredentialSet, AuthError> {
        // The request goes out with whatever is stored, even nothing at
        // all, and the endpoint gets to reject it. Bootstrap with an
        // empty store depends on that: the failed refresh is what
        // triggers the logout navigation.
        let refresh_token = self
            .store
            .load()?
            .map(|c| c.refresh_token)
            .unwrap_or_default();

        self.transition(AuthState::RefreshPending).await;

        let response = match self.endpoint.refresh(&refresh_token).await {
            Ok(response) => response,
            Err(e) => {
                self.transition(AuthState::Unauthenticated).await;
                return Err(e);
            }
        };

        let credentials = CredentialSet {
            access_token: response.access_token,
            // Not rotated: the stored refresh token outlives the refresh.
            refresh_token,
            id_token: response.id_token,
            expires_in: response.expires_in,
        };
        self.store.save(&credentials)?;
        self.transition(AuthState::Authenticated).await;

        tracing::debug!(expires_in = credentials.expires_in, "credentials refreshed");
        Ok(credentials)
    }

    /// Arms the single proactive refresh task.
    ///
    /// The task sleeps until `expires_in − 300` seconds have passed,
    /// refreshes, and re-arms itself on success; on failure it forces a
    /// logout and stops. No-op when no credential set is stored. Arming
    /// supersedes any previously armed task.
    pub async fn schedule_refresh(&self) {
        let expires_in = match self.store.load() {
            Ok(Some(credentials)) => credentials.expires_in,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "cannot schedule refresh: store unreadable");
                return;
            }
        };

        let first_delay = refresh_delay(expires_in);
        tracing::debug!(delay_secs = first_delay.as_secs(), "refresh scheduled");

        // The task holds a weak handle so a dropped lifecycle is not
        // kept alive by its own timer.
        let weak = self.weak.clone();
        let task = tokio::spawn(async move {
            let mut delay = first_delay;
            loop {
                tokio::time::sleep(delay).await;
                let Some(this) = weak.upgrade() else {
                    break;
                };
                match this.refresh_inner().await {
                    Ok(credentials) => {
                        delay = refresh_delay(credentials.expires_in);
                        tracing::debug!(
                            delay_secs = delay.as_secs(),
                            "scheduled refresh succeeded - re-armed"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "scheduled refresh failed - forcing logout");
                        this.logout().await;
                        break;
                    }
                }
            }
        });

        if let Some(previous) = self.refresh_task.lock().await.replace(task) {
            previous.abort();
        }
    }

    /// Clears all credentials, cancels any pending refresh, and
    /// navigates to the identity provider's logout endpoint.
    ///
    /// Idempotent — safe to call with no active credentials.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear credential store on logout");
        }
        self.transition(AuthState::LoggedOut).await;
        self.view.navigate(self.logout_url.as_str());

        // Abort last: when the scheduled task itself triggers the
        // logout, nothing after this point may await.
        if let Some(task) = self.refresh_task.lock().await.take() {
            task.abort();
        }
    }

    /// Renders the view matching the persisted credential state.
    pub fn render_view(&self) {
        match self.store.load() {
            Ok(Some(_)) => self.view.render_authenticated(),
            Ok(None) => self.view.render_anonymous(),
            Err(e) => {
                tracing::warn!(error = %e, "credential store unreadable - rendering anonymous");
                self.view.render_anonymous();
            }
        }
    }

    async fn transition(&self, next: AuthState) {
        let mut state = self.state.lock().await;
        if *state == next {
            return;
        }
        if !state.can_transition_to(next) {
            tracing::warn!(from = %*state, to = %next, "unexpected auth state transition");
        }
        tracing::debug!(from = %*state, to = %next, "auth state");
        *state = next;
    }
}
