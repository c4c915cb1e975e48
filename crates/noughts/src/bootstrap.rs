//! Page-load entry point.

use noughts_auth::{AuthView, TokenLifecycle};

/// Runs the startup authentication flow and leaves the view rendered.
///
/// With an authorization code (the provider's redirect landed here):
/// exchange it for a credential set and render the authenticated view.
/// Without one, or when the exchange fails, render whatever the store
/// holds and attempt a silent refresh; a successful refresh re-renders,
/// a failed one forces the logout navigation inside
/// [`TokenLifecycle::refresh`].
///
/// Authentication failures never surface as errors to the caller — they
/// become either a degraded anonymous view or the logout redirect.
pub async fn bootstrap<V: AuthView>(lifecycle: &TokenLifecycle<V>, code: Option<&str>) {
    if let Some(code) = code {
        match lifecycle.exchange_code(code).await {
            Ok(_) => {
                lifecycle.render_view();
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "code exchange failed - falling back to refresh");
            }
        }
    }

    // Render the last-known state first so the page is never blank
    // while the refresh is in flight.
    lifecycle.render_view();

    match lifecycle.refresh().await {
        Ok(_) => lifecycle.render_view(),
        Err(e) => {
            // The lifecycle has already cleared the store and navigated
            // to the logout endpoint.
            tracing::info!(error = %e, "silent refresh failed at startup");
        }
    }
}
