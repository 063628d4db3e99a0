//! # CLI Module
//!
//! User-facing commands. Each one takes the assembled [`App`] and drives the
//! session, catalog and recommendation services, printing tables and status
//! lines along the way.
//!
//! ## Commands
//!
//! - [`auth`] / [`logout`] - sign in with Spotify (OAuth + PKCE) or sign out
//! - [`home`] - short-term top artists and tracks side by side
//! - [`artists`] / [`tracks`] - full top lists for a time window
//! - [`recommend`] - AI suggestions seeded with up to five of your top tracks
//! - [`playlist`] - AI playlist for a free-text theme or mood
//!
//! Every command except `auth` needs a session. Without one the command
//! stops and tells the user to run `spotifyou auth` first, naming the command
//! to re-run afterwards.
//!
//! ## Usage
//!
//! ```bash
//! spotifyou auth
//! spotifyou home
//! spotifyou artists --time-range long_term --limit 20
//! spotifyou tracks --refresh
//! spotifyou recommend --pick 1 --pick 4
//! spotifyou playlist "rainy sunday coffee"
//! ```

mod auth;
mod home;
mod recommend;
mod top;

pub use auth::auth;
pub use auth::logout;
pub use home::home;
pub use recommend::playlist;
pub use recommend::recommend;
pub use top::artists;
pub use top::tracks;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, session::SessionProvider};

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Stops the program unless a valid session exists.
pub(crate) async fn require_session(session: &SessionProvider, command: &str) {
    match session.get_session().await {
        Some(s) if s.is_valid() => {}
        _ => error!(
            "No active session. Please run `spotifyou auth`, then `spotifyou {}` again.",
            command
        ),
    }
}
