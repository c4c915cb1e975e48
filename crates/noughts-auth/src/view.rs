//! Presentation hook for authentication state.
//!
//! The lifecycle manager doesn't render anything itself — that's the
//! embedding application's job. It defines the [`AuthView`] trait: a
//! handful of callbacks the manager invokes as the session moves between
//! anonymous and authenticated, plus the navigation used for the forced
//! logout redirect.
//!
//! Implementations range from a real UI in production to a recording
//! stub in tests, without changing any lifecycle code.

/// Receives authentication-state pushes from the lifecycle manager.
///
/// # Trait bounds
///
/// - `Send + Sync` → the view is shared with the background refresh task.
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the lifecycle manager.
pub trait AuthView: Send + Sync + 'static {
    /// The user has a complete credential set; show the logged-in surface.
    fn render_authenticated(&self);

    /// No usable credentials; show the anonymous / log-in surface.
    fn render_anonymous(&self);

    /// Navigate away to the given URL. Used exactly once per session, for
    /// the identity provider's logout endpoint.
    fn navigate(&self, url: &str);
}
