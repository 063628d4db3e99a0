//! Application assembly.
//!
//! Builds every component once from [`Settings`] and hands out explicit
//! handles; nothing in the crate reaches for process-wide state.

use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::Settings,
    error::RecommendationError,
    management::{Cache, FileCacheStore, SessionStore},
    recommend::{GeminiClient, Recommender},
    session::SessionProvider,
    spotify::{SpotifyClient, auth::SpotifyIdentity},
};

#[derive(Clone)]
pub struct App {
    pub settings: Settings,
    pub session: SessionProvider,
    pub catalog: Catalog,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let identity = SpotifyIdentity::new(
            &settings.spotify,
            SessionStore::new(settings.session_path()),
        );
        let session = SessionProvider::new(Arc::new(identity));

        let client = SpotifyClient::new(settings.spotify.api_url.clone(), session.clone());
        let cache = Cache::with_ttl(
            Arc::new(FileCacheStore::new(settings.cache_dir())),
            settings.cache_ttl,
        );

        Self {
            catalog: Catalog::new(client, cache),
            session,
            settings,
        }
    }

    /// Recommender backed by Gemini; fails when no API key is configured.
    pub fn recommender(&self) -> Result<Recommender, RecommendationError> {
        let gemini = GeminiClient::from_settings(&self.settings.gemini)?;
        Ok(Recommender::new(Arc::new(gemini)))
    }
}
