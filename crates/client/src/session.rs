//! Shared bearer-credential session state.
//!
//! A [`Session`] is cloned into every [`ApiClient`](crate::api::ApiClient)
//! and observed by the embedding UI through a `tokio::sync::watch`
//! channel.  Expiry is coalesced: when several in-flight requests hit 401
//! at once, only the first one tears the session down and emits the
//! `Expired` event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use evotrack_core::models::User;

/// Lifecycle event published on the session watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// No credential, or a freshly stored one.
    Active,
    /// The credential was rejected with 401 and has been cleared.  The
    /// embedding UI is expected to redirect to its login entry point.
    Expired,
}

struct SessionInner {
    token: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
    expired: AtomicBool,
    events: watch::Sender<SessionEvent>,
}

/// Cloneable handle to the process-wide session state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new() -> Self {
        let (events, _) = watch::channel(SessionEvent::Active);
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(None),
                user: RwLock::new(None),
                expired: AtomicBool::new(false),
                events,
            }),
        }
    }

    /// Store a credential and its user after a successful login.
    pub fn authenticate(&self, token: String, user: User) {
        *self.inner.token.write().expect("session lock poisoned") = Some(token);
        *self.inner.user.write().expect("session lock poisoned") = Some(user);
        self.inner.expired.store(false, Ordering::SeqCst);
        let _ = self.inner.events.send(SessionEvent::Active);
        tracing::info!("Session authenticated");
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().expect("session lock poisoned").clone()
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.inner.user.read().expect("session lock poisoned").clone()
    }

    /// Clear credentials without emitting `Expired` (explicit logout).
    pub fn clear(&self) {
        *self.inner.token.write().expect("session lock poisoned") = None;
        *self.inner.user.write().expect("session lock poisoned") = None;
    }

    /// Tear the session down after a 401.
    ///
    /// Coalesced: concurrent 401s trigger exactly one teardown and one
    /// `Expired` event until the next successful `authenticate`.
    pub fn expire(&self) {
        if self.inner.expired.swap(true, Ordering::SeqCst) {
            return;
        }
        self.clear();
        let _ = self.inner.events.send(SessionEvent::Expired);
        tracing::warn!("Session expired, credentials cleared");
    }

    /// Subscribe to session lifecycle events.
    pub fn watch(&self) -> watch::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use evotrack_core::types::Role;

    fn user() -> User {
        User {
            id: "u1".into(),
            nome: "Ana".into(),
            email: "ana@example.com".into(),
            role: Role::Professor,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn authenticate_stores_token_and_user() {
        let session = Session::new();
        session.authenticate("tok".into(), user());
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user().unwrap().id, "u1");
    }

    #[tokio::test]
    async fn expire_clears_credentials_and_notifies_once() {
        let session = Session::new();
        let mut rx = session.watch();
        session.authenticate("tok".into(), user());
        assert_eq!(*rx.borrow_and_update(), SessionEvent::Active);

        session.expire();
        session.expire();
        session.expire();

        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionEvent::Expired);
        // Coalesced: no further change is pending after the first event.
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn authenticate_rearms_expiry_after_teardown() {
        let session = Session::new();
        session.expire();
        session.authenticate("tok2".into(), user());

        let mut rx = session.watch();
        session.expire();
        assert_eq!(*rx.borrow_and_update(), SessionEvent::Expired);
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn logout_does_not_emit_expired() {
        let session = Session::new();
        session.authenticate("tok".into(), user());
        let mut rx = session.watch();
        rx.borrow_and_update();

        session.clear();
        assert!(session.token().is_none());
        assert!(!rx.has_changed().unwrap());
    }
}
