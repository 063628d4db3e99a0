//! Error taxonomy for spotifyou.
//!
//! Each collaborator has its own error enum so callers can tell an expired
//! session apart from a failing Spotify request or an unavailable AI backend.
//! [`Error`] folds them together for code paths that touch several of them.
//!
//! Propagation rules:
//! - [`AuthError`] and [`UpstreamError`] bubble up to the CLI, which prints a
//!   message and stops the affected command.
//! - [`RecommendationError`] behaves the same for the AI commands.
//! - [`CacheError`] never leaves the catalog; it is printed as a warning and
//!   the freshly fetched data is used instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No active session")]
    NoSession,

    #[error("Unsupported identity provider: {0}")]
    UnsupportedProvider(String),

    #[error("Sign-in timed out waiting for the OAuth callback")]
    Timeout,

    #[error("OAuth callback failed: {0}")]
    Callback(String),

    #[error("Token request failed: {0}")]
    TokenRequest(String),

    #[error("Callback server error: {0}")]
    Server(String),

    #[error("Session store error at {path}: {message}")]
    Store { path: PathBuf, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Spotify request to {path} failed with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Spotify request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {path}: {message}")]
    Decode { path: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("Nothing to recommend from: {0}")]
    EmptyInput(&'static str),

    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Generative backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Generative backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
