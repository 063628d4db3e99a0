//! Top artists and tracks, read through the response cache.
//!
//! Every read computes a key of the form `top_{artists|tracks}_{range}_{limit}`.
//! A fresh cache entry is returned without touching Spotify; otherwise the
//! items are fetched, written back to the cache and returned. The cache is an
//! optimization only: any cache failure is printed as a warning and the read
//! carries on against Spotify.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{Error, UpstreamError},
    management::Cache,
    spotify::SpotifyClient,
    types::{Artist, HomeSummary, TimeRange, Track},
    warning,
};

pub const DEFAULT_LIMIT: u32 = 50;
pub const HOME_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopKind {
    Artists,
    Tracks,
}

impl TopKind {
    fn as_str(self) -> &'static str {
        match self {
            TopKind::Artists => "artists",
            TopKind::Tracks => "tracks",
        }
    }
}

/// Cache key for one top list, e.g. `top_artists_short_term_10`.
///
/// Unknown time ranges are used verbatim, so every distinct request gets its
/// own entry.
pub fn cache_key(kind: &str, time_range: &TimeRange, limit: u32) -> String {
    format!("top_{}_{}_{}", kind, time_range, limit)
}

/// Read-through access to the user's top artists and tracks.
#[derive(Clone)]
pub struct Catalog {
    client: SpotifyClient,
    cache: Cache,
}

impl Catalog {
    pub fn new(client: SpotifyClient, cache: Cache) -> Self {
        Self { client, cache }
    }

    /// Fetches the user's top artists for a time window.
    ///
    /// A fresh cache entry is returned without contacting Spotify. On a miss
    /// the list is requested from `GET /me/top/artists`, cached and returned.
    ///
    /// # Arguments
    ///
    /// * `time_range` - Aggregation window; unknown values are sent as-is
    /// * `limit` - Maximum number of artists Spotify should return
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<Artist>)` - Artists in Spotify's ranking order
    /// - `Err(Error::Auth)` - No valid session; nothing was sent upstream
    /// - `Err(Error::Upstream)` - Spotify failed or answered with an unexpected body
    ///
    /// Cache failures never show up here; they are printed as warnings.
    ///
    /// # Example
    ///
    /// ```
    /// let artists = catalog.top_artists(&TimeRange::ShortTerm, 10).await?;
    /// ```
    pub async fn top_artists(
        &self,
        time_range: &TimeRange,
        limit: u32,
    ) -> Result<Vec<Artist>, Error> {
        self.top_items(TopKind::Artists, time_range, limit).await
    }

    /// Fetches the user's top tracks for a time window.
    ///
    /// Same caching and error behavior as [`Catalog::top_artists`], against
    /// `GET /me/top/tracks`.
    pub async fn top_tracks(
        &self,
        time_range: &TimeRange,
        limit: u32,
    ) -> Result<Vec<Track>, Error> {
        self.top_items(TopKind::Tracks, time_range, limit).await
    }

    /// Drops the cached entry and reads straight from Spotify.
    ///
    /// The fresh list is written back, so the next plain read is a hit
    /// again. A failed invalidation is only a warning.
    pub async fn refresh_top_artists(
        &self,
        time_range: &TimeRange,
        limit: u32,
    ) -> Result<Vec<Artist>, Error> {
        self.invalidate(TopKind::Artists, time_range, limit).await;
        self.top_artists(time_range, limit).await
    }

    pub async fn refresh_top_tracks(
        &self,
        time_range: &TimeRange,
        limit: u32,
    ) -> Result<Vec<Track>, Error> {
        self.invalidate(TopKind::Tracks, time_range, limit).await;
        self.top_tracks(time_range, limit).await
    }

    /// Short-term top artists and tracks, fetched concurrently.
    ///
    /// Both lists use `short_term` and a limit of [`HOME_LIMIT`].
    ///
    /// # Errors
    ///
    /// Either failure fails the whole summary; there is no partial result.
    pub async fn home_summary(&self) -> Result<HomeSummary, Error> {
        let (artists, tracks) = tokio::try_join!(
            self.top_artists(&TimeRange::ShortTerm, HOME_LIMIT),
            self.top_tracks(&TimeRange::ShortTerm, HOME_LIMIT),
        )?;
        Ok(HomeSummary { artists, tracks })
    }

    async fn invalidate(&self, kind: TopKind, time_range: &TimeRange, limit: u32) {
        let key = cache_key(kind.as_str(), time_range, limit);
        if let Err(e) = self.cache.invalidate(&key).await {
            warning!("Failed to invalidate cache entry {}: {}", key, e);
        }
    }

    async fn top_items<T: DeserializeOwned>(
        &self,
        kind: TopKind,
        time_range: &TimeRange,
        limit: u32,
    ) -> Result<Vec<T>, Error> {
        let key = cache_key(kind.as_str(), time_range, limit);

        match self.cache.get(&key).await {
            Ok(Some(cached)) => match serde_json::from_value::<Vec<T>>(cached) {
                Ok(items) => return Ok(items),
                Err(e) => warning!("Ignoring unreadable cache entry {}: {}", key, e),
            },
            Ok(None) => {}
            Err(e) => warning!("Failed to read cache entry {}: {}", key, e),
        }

        let path = format!("/me/top/{}", kind.as_str());
        let response = self
            .client
            .request(
                &path,
                &[
                    ("time_range", time_range.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let raw_items = extract_items(&path, response)?;

        if let Err(e) = self.cache.set(&key, &raw_items).await {
            warning!("Error caching data for {}: {}", key, e);
        }

        serde_json::from_value::<Vec<T>>(raw_items).map_err(|e| {
            UpstreamError::Decode {
                path,
                message: e.to_string(),
            }
            .into()
        })
    }
}

fn extract_items(path: &str, mut response: Value) -> Result<Value, UpstreamError> {
    match response.get_mut("items").map(Value::take) {
        Some(items @ Value::Array(_)) => Ok(items),
        _ => Err(UpstreamError::Decode {
            path: path.to_string(),
            message: "response has no items array".to_string(),
        }),
    }
}
