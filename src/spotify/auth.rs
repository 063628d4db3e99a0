use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::{Mutex, watch};

use crate::{
    config::SpotifySettings,
    error::AuthError,
    management::SessionStore,
    server::{self, CallbackState},
    session::{IdentityBackend, SPOTIFY_PROVIDER, SignInOptions},
    types::{PkceState, Session, Token},
    utils, warning,
};

/// How long sign-in waits for the browser round trip.
pub const SIGN_IN_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the Spotify accounts token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    token_url: String,
}

impl OAuthClient {
    pub fn new(client_id: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            client_id: client_id.into(),
            token_url: token_url.into(),
        }
    }

    /// Exchanges an authorization code for a session using the PKCE verifier
    /// generated at the start of the flow.
    pub async fn exchange_code_pkce(
        &self,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
    ) -> Result<Session, AuthError> {
        let token = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("client_id", &self.client_id),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", redirect_uri),
            ])
            .await?;

        Session::from_token(token, Utc::now())
    }

    /// Exchanges a refresh token for a new session.
    ///
    /// Spotify may omit the refresh token from the response, in which case the
    /// one we already hold stays valid.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let token = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.client_id),
            ])
            .await?;

        let mut session = Session::from_token(token, Utc::now())?;
        if session.refresh_token.is_none() {
            session.refresh_token = Some(refresh_token.to_string());
        }
        Ok(session)
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<Token, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| AuthError::TokenRequest(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::TokenRequest(format!("status {}: {}", status, body)));
        }

        res.json::<Token>()
            .await
            .map_err(|e| AuthError::TokenRequest(e.to_string()))
    }
}

/// Spotify accounts as the identity backend.
///
/// Sign-in runs the OAuth 2.0 authorization code flow with PKCE: a local
/// callback server receives the code, which is exchanged for a session and
/// stored on disk. Refresh happens transparently in [`get_session`].
///
/// [`get_session`]: IdentityBackend::get_session
pub struct SpotifyIdentity {
    oauth: OAuthClient,
    auth_url: String,
    server_addr: String,
    store: SessionStore,
    changes: watch::Sender<Option<Session>>,
    sign_in_timeout: Duration,
}

impl SpotifyIdentity {
    pub fn new(settings: &SpotifySettings, store: SessionStore) -> Self {
        Self {
            oauth: OAuthClient::new(settings.client_id.clone(), settings.token_url.clone()),
            auth_url: settings.auth_url.clone(),
            server_addr: settings.server_addr.clone(),
            store,
            changes: watch::Sender::new(None),
            sign_in_timeout: SIGN_IN_TIMEOUT,
        }
    }

    pub fn with_sign_in_timeout(mut self, timeout: Duration) -> Self {
        self.sign_in_timeout = timeout;
        self
    }

    /// Builds the URL the user opens to grant access.
    pub fn authorize_url(
        &self,
        options: &SignInOptions,
        code_challenge: &str,
        state: &str,
    ) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.oauth.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", options.redirect_to.as_str()),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "S256"),
                ("state", state),
                ("scope", options.scopes.as_str()),
            ],
        )
        .map_err(|e| AuthError::Callback(format!("invalid authorization URL: {}", e)))
    }

    fn publish(&self, session: Option<Session>) {
        self.changes.send_replace(session);
    }
}

#[async_trait]
impl IdentityBackend for SpotifyIdentity {
    async fn sign_in_with_oauth(&self, options: &SignInOptions) -> Result<Session, AuthError> {
        if options.provider != SPOTIFY_PROVIDER {
            return Err(AuthError::UnsupportedProvider(options.provider.clone()));
        }

        // generate PKCE verifier and challenge
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let state = utils::generate_oauth_state();
        // fail before anything is bound or spawned
        let auth_url = self.authorize_url(options, &code_challenge, &state)?;

        let shared_state = Arc::new(Mutex::new(Some(PkceState {
            code_verifier,
            state,
            redirect_uri: options.redirect_to.clone(),
            session: None,
            error: None,
        })));

        let listener = server::bind(&self.server_addr).await?;
        let callback_state = CallbackState {
            pkce: Arc::clone(&shared_state),
            oauth: self.oauth.clone(),
        };
        let server = tokio::spawn(server::serve(listener, callback_state));

        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }

        let result = wait_for_session(shared_state, self.sign_in_timeout).await;
        server.abort();
        // wait for the listener to be dropped so the address is free again
        let _ = server.await;

        let session = result?;
        self.store.persist(&session).await?;
        self.publish(Some(session.clone()));
        Ok(session)
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.store.load().await? else {
            return Ok(None);
        };

        if !session.needs_refresh() {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.clone() else {
            return Ok(Some(session));
        };

        match self.oauth.refresh(&refresh_token).await {
            Ok(refreshed) => {
                self.store.persist(&refreshed).await?;
                self.publish(Some(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(e) if session.is_valid() => {
                warning!("Failed to refresh session, using current token: {}", e);
                Ok(Some(session))
            }
            Err(e) => Err(e),
        }
    }

    fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        self.publish(None);
        Ok(())
    }
}

/// Polls the shared PKCE state until the callback stores a session or an
/// error, or the timeout passes.
async fn wait_for_session(
    shared_state: Arc<Mutex<Option<PkceState>>>,
    max_wait: Duration,
) -> Result<Session, AuthError> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce) = lock.as_ref() {
            if let Some(session) = &pkce.session {
                return Ok(session.clone());
            }
            if let Some(error) = &pkce.error {
                return Err(AuthError::Callback(error.clone()));
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    Err(AuthError::Timeout)
}
