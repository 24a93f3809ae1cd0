//! Route gating decisions.

/// How a view relates to authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Requires a live session (dashboard, settings, file views).
    Protected,
    /// Login/registration entry points, pointless once authenticated.
    Auth,
    /// Accessible either way (not-found page).
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl RouteKind {
    /// The gate decision for this route given current session validity.
    ///
    /// Callers re-evaluate this on every token change (via the session
    /// context subscription), not just once at mount.
    #[must_use]
    pub fn decide(self, session_valid: bool) -> RouteDecision {
        match (self, session_valid) {
            (RouteKind::Protected, false) => RouteDecision::RedirectToLogin,
            (RouteKind::Auth, true) => RouteDecision::RedirectToDashboard,
            _ => RouteDecision::Allow,
        }
    }
}
