//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs while a
//! sign-in is in progress.
//!
//! - [`callback`] receives the redirect from Spotify's authorization server,
//!   checks the `state` value and exchanges the authorization code (plus the
//!   PKCE verifier) for a session.
//! - [`health`] reports status and version, handy for checking that the
//!   configured `SERVER_ADDRESS` is reachable.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotifyou::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
