//! The authentication state machine.

/// The lifecycle state of the authenticated session, per process.
///
/// ```text
/// Unauthenticated → Exchanging → Authenticated ⇄ RefreshPending
///        │               │            │               │
///        │               └──(fail)────┤               └──(fail)──┐
///        └────────────────────────────┴─────────────→ LoggedOut ─┘
/// ```
///
/// - **Unauthenticated**: no usable credentials; also the landing state
///   after a failed exchange or refresh, just before the logout
///   navigation fires.
/// - **Exchanging**: the authorization-code exchange is in flight.
/// - **Authenticated**: a complete credential set is stored and a
///   proactive refresh is armed.
/// - **RefreshPending**: a refresh exchange is in flight. Reached from
///   `Authenticated` (scheduled renewal) or directly from
///   `Unauthenticated` (silent refresh during bootstrap).
/// - **LoggedOut**: terminal for this process instance — reached via the
///   logout navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Exchanging,
    Authenticated,
    RefreshPending,
    LoggedOut,
}

impl AuthState {
    /// Returns `true` if a complete credential set backs this state.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated | Self::RefreshPending)
    }

    /// Returns `true` if transitioning to `target` is a legal step.
    pub fn can_transition_to(self, target: Self) -> bool {
        use AuthState::*;
        match self {
            Unauthenticated => matches!(target, Exchanging | RefreshPending | LoggedOut),
            Exchanging => matches!(target, Authenticated | Unauthenticated),
            Authenticated => matches!(target, RefreshPending | LoggedOut),
            RefreshPending => matches!(target, Authenticated | Unauthenticated | LoggedOut),
            LoggedOut => false,
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Exchanging => write!(f, "Exchanging"),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::RefreshPending => write!(f, "RefreshPending"),
            Self::LoggedOut => write!(f, "LoggedOut"),
        }
    }
}
