//! Observable holder for the current session.

use chrono::{DateTime, Utc};

use herbwise_types::{TokenClaims, UserClaims};

use crate::token;

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
}

/// Handle returned by [`SessionContext::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(&SessionEvent)>;

/// Single source of truth for the current token and the identity decoded
/// from it.
///
/// Owned by the event loop and driven single-threaded; subscribers are
/// invoked synchronously inside `login`/`logout`, so consumers re-evaluate
/// gating on every token change instead of polling.
///
/// Validity is deliberately not a stored field: [`Self::is_authenticated_at`]
/// recomputes it from the raw token so that expiry takes effect the moment
/// the clock passes `exp`, with no state transition required.
#[derive(Default)]
pub struct SessionContext {
    token: Option<String>,
    claims: Option<TokenClaims>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u64,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("claims", &self.claims)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly issued token and notify subscribers.
    ///
    /// The raw token is kept even when its claims fail to decode: the gate
    /// re-derives validity from the raw value, so a bad token simply denies
    /// access later rather than failing the login commit.
    pub fn login(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.claims = match token::decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(error) => {
                tracing::warn!(%error, "stored session token has undecodable claims");
                None
            }
        };
        self.token = Some(token);
        tracing::debug!("session established");
        self.notify(&SessionEvent::LoggedIn);
    }

    /// Discard the session and notify subscribers.
    pub fn logout(&mut self) {
        self.token = None;
        self.claims = None;
        tracing::debug!("session cleared");
        self.notify(&SessionEvent::LoggedOut);
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Identity claims of the logged-in user, when the token carried any.
    #[must_use]
    pub fn user(&self) -> Option<UserClaims> {
        self.claims.as_ref().map(TokenClaims::user)
    }

    #[must_use]
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        token::is_valid_at(self.token(), now)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Register a change listener, invoked synchronously on every
    /// login/logout.
    pub fn subscribe(&mut self, callback: impl FnMut(&SessionEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, event: &SessionEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!("hdr.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn login_exposes_token_and_user() {
        let mut session = SessionContext::new();
        assert!(session.token().is_none());

        let token = token_with_payload(r#"{"exp":1000,"name":"Ada","email":"a@b.co"}"#);
        session.login(token.clone());
        assert_eq!(session.token(), Some(token.as_str()));
        assert_eq!(session.user().unwrap().name.as_deref(), Some("Ada"));
        assert!(session.is_authenticated_at(at(999)));
        assert!(!session.is_authenticated_at(at(1000)));
    }

    #[test]
    fn logout_clears_everything() {
        let mut session = SessionContext::new();
        session.login(token_with_payload(r#"{"exp":1000}"#));
        session.logout();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(!session.is_authenticated_at(at(0)));
    }

    #[test]
    fn undecodable_token_is_stored_but_never_authenticates() {
        let mut session = SessionContext::new();
        session.login("not-a-token");
        assert_eq!(session.token(), Some("not-a-token"));
        assert!(session.user().is_none());
        assert!(!session.is_authenticated_at(at(0)));
    }

    #[test]
    fn subscribers_observe_login_and_logout() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut session = SessionContext::new();
        let id = session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        session.login(token_with_payload(r#"{"exp":1000}"#));
        session.logout();
        assert_eq!(
            *events.borrow(),
            vec![SessionEvent::LoggedIn, SessionEvent::LoggedOut]
        );

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.login(token_with_payload(r#"{"exp":1000}"#));
        assert_eq!(events.borrow().len(), 2);
    }
}
