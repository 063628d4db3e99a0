//! Session gating for every upstream call.
//!
//! [`SessionProvider`] wraps an [`IdentityBackend`] and is the only place
//! the rest of the crate asks for a bearer token. It never retries: a missing
//! or expired session is reported straight back to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{sync::watch, task::JoinHandle};

use crate::{error::AuthError, types::Session, warning};

pub const SPOTIFY_PROVIDER: &str = "spotify";

#[derive(Debug, Clone)]
pub struct SignInOptions {
    pub provider: String,
    pub scopes: String,
    pub redirect_to: String,
}

/// The identity service that owns sessions.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn sign_in_with_oauth(&self, options: &SignInOptions) -> Result<Session, AuthError>;

    /// Returns the current session, refreshing it first if it is about to
    /// expire and can be refreshed.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Receiver that observes every session change.
    fn on_session_change(&self) -> watch::Receiver<Option<Session>>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Clone)]
pub struct SessionProvider {
    backend: Arc<dyn IdentityBackend>,
}

impl SessionProvider {
    pub fn new(backend: Arc<dyn IdentityBackend>) -> Self {
        Self { backend }
    }

    /// Current session, or `None` if there is none or the backend failed.
    pub async fn get_session(&self) -> Option<Session> {
        match self.backend.get_session().await {
            Ok(session) => session,
            Err(e) => {
                warning!("Failed to get session: {}", e);
                None
            }
        }
    }

    /// Returns the bearer token of the current session.
    ///
    /// The session is read from the backend on every call, so a refresh done
    /// elsewhere is picked up immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoSession`] when there is no session, the session
    /// has expired, or the backend could not be reached.
    pub async fn get_access_token(&self) -> Result<String, AuthError> {
        match self.get_session().await {
            Some(session) if session.is_valid() => Ok(session.access_token),
            _ => Err(AuthError::NoSession),
        }
    }

    /// Starts an OAuth sign-in with Spotify.
    ///
    /// # Arguments
    ///
    /// * `scopes` - Space-separated scopes to request
    /// * `redirect_to` - Callback URI registered with the Spotify application
    pub async fn sign_in(&self, scopes: &str, redirect_to: &str) -> Result<Session, AuthError> {
        let options = SignInOptions {
            provider: SPOTIFY_PROVIDER.to_string(),
            scopes: scopes.to_string(),
            redirect_to: redirect_to.to_string(),
        };
        self.backend.sign_in_with_oauth(&options).await
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.backend.sign_out().await
    }

    /// Receiver holding the latest session; `changed()` resolves on sign-in,
    /// refresh and sign-out.
    pub fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.backend.on_session_change()
    }

    /// Calls `listener` on every session change until the returned
    /// subscription is dropped.
    pub fn on_change<F>(&self, listener: F) -> SessionSubscription
    where
        F: Fn(Option<Session>) + Send + 'static,
    {
        let mut rx = self.watch();
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let session = rx.borrow_and_update().clone();
                listener(session);
            }
        });
        SessionSubscription { task }
    }
}

/// Handle for a session listener; dropping it unsubscribes.
pub struct SessionSubscription {
    task: JoinHandle<()>,
}

impl SessionSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
