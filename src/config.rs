//! Configuration management for spotifyou.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The getters below read single variables;
//! [`Settings::from_env`] collects them into one explicit handle that the
//! application assembly passes down to every component.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults for public endpoints and scopes

use std::{env, path::PathBuf};

use chrono::Duration;

use crate::{Res, error::ConfigError};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "user-read-email user-top-read";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_CACHE_TTL_SECS: i64 = 3600;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at `<data_local_dir>/spotifyou/.env`:
/// - Linux: `~/.local/share/spotifyou/.env`
/// - macOS: `~/Library/Application Support/spotifyou/.env`
/// - Windows: `%LOCALAPPDATA%/spotifyou/.env`
///
/// A missing file is not an error; every variable can also come from the
/// process environment.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file exists but cannot be
/// parsed.
pub async fn load_env() -> Res<()> {
    let mut path = base_data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn base_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotifyou");
    path
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn or_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:8888`. The port must match
/// the one in [`spotify_redirect_uri`].
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify application client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// Reads `SPOTIFY_API_REDIRECT_URI`. When unset it is derived from the
/// callback server address, e.g. `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| format!("http://{}/callback", server_addr()))
}

/// Returns the space-separated scopes requested at sign-in.
pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Gemini API key, if configured.
///
/// Only the AI commands need it, so absence is reported when a recommender is
/// built rather than at startup.
pub fn gemini_api_key() -> Option<String> {
    env::var("GEMINI_API_KEY")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn gemini_model() -> String {
    or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL)
}

pub fn gemini_api_url() -> String {
    or_default("GEMINI_API_URL", DEFAULT_GEMINI_API_URL)
}

/// Returns the directory holding the session file and the cache.
///
/// Reads `SPOTIFYOU_DATA_DIR`, defaulting to `<data_local_dir>/spotifyou`.
pub fn data_dir() -> PathBuf {
    env::var("SPOTIFYOU_DATA_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(base_data_dir)
}

/// Returns how long cached catalog responses stay fresh.
///
/// Reads `SPOTIFYOU_CACHE_TTL_SECS`, defaulting to one hour.
pub fn cache_ttl() -> Result<Duration, ConfigError> {
    match env::var("SPOTIFYOU_CACHE_TTL_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs >= 0)
            .map(Duration::seconds)
            .ok_or(ConfigError::Invalid {
                name: "SPOTIFYOU_CACHE_TTL_SECS",
                message: format!("expected a non-negative number of seconds, got {raw:?}"),
            }),
        Err(_) => Ok(Duration::seconds(DEFAULT_CACHE_TTL_SECS)),
    }
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

/// Everything the application assembly needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify: SpotifySettings,
    pub gemini: GeminiSettings,
    pub data_dir: PathBuf,
    pub cache_ttl: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            spotify: SpotifySettings {
                client_id: spotify_client_id()?,
                redirect_uri: spotify_redirect_uri(),
                scope: spotify_scope(),
                auth_url: spotify_apiauth_url(),
                token_url: spotify_apitoken_url(),
                api_url: spotify_apiurl(),
                server_addr: server_addr(),
            },
            gemini: GeminiSettings {
                api_key: gemini_api_key(),
                model: gemini_model(),
                api_url: gemini_api_url(),
            },
            data_dir: data_dir(),
            cache_ttl: cache_ttl()?,
        })
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }
}
