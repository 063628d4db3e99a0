//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! ```text
//! Catalog / CLI
//!      ↓
//! SpotifyClient ── bearer token ──> SessionProvider ──> SpotifyIdentity
//!      ↓                                                   (auth)
//! Spotify Web API (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the identity backend: OAuth 2.0 authorization code with
//! PKCE, a temporary callback server, token exchange and refresh, and session
//! persistence.
//!
//! ## Requests
//!
//! [`SpotifyClient::request`] issues one authenticated `GET` against the Web
//! API. The bearer token is fetched from the [`SessionProvider`] on every call,
//! so the client never holds a stale token. Failures are returned as-is:
//! there is no retry and no backoff, and no timeout beyond reqwest's default.
//!
//! ## API Coverage
//!
//! - `GET /me/top/artists?time_range&limit`
//! - `GET /me/top/tracks?time_range&limit`
//! - `POST /api/token` (accounts service, see [`auth`])

pub mod auth;

use reqwest::Client;
use serde_json::Value;

use crate::{
    error::{Error, UpstreamError},
    session::SessionProvider,
};

#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    session: SessionProvider,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>, session: SessionProvider) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Sends an authenticated `GET {base_url}{path}` with the given query
    /// parameters and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] when there is no valid session; no request is sent.
    /// - [`Error::Upstream`] on a transport failure, a non-2xx status or a
    ///   body that is not JSON.
    pub async fn request(&self, path: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        let token = self.session.get_access_token().await?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let json = response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(json)
    }
}
