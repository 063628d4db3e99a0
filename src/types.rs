use std::{convert::Infallible, fmt, str::FromStr};

use chrono::{DateTime, Duration, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::AuthError;

/// Seconds before expiry at which a session is refreshed.
pub const SESSION_REFRESH_MARGIN_SECS: i64 = 240;

/// Token response from the Spotify accounts service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: i64,
}

/// An authenticated identity-provider session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session from a token response received at `obtained_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenRequest`] when `expires_in` does not fit in a
    /// timestamp.
    pub fn from_token(token: Token, obtained_at: DateTime<Utc>) -> Result<Self, AuthError> {
        let expires_at = TimeDelta::try_seconds(token.expires_in)
            .and_then(|lifetime| obtained_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::TokenRequest(format!(
                    "token expiry out of range: {} seconds",
                    token.expires_in
                ))
            })?;

        Ok(Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            scope: token.scope,
            expires_at,
        })
    }

    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }

    pub fn needs_refresh(&self) -> bool {
        Utc::now() + Duration::seconds(SESSION_REFRESH_MARGIN_SECS) >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct PkceState {
    pub code_verifier: String,
    pub state: String,
    pub redirect_uri: String,
    pub session: Option<Session>,
    pub error: Option<String>,
}

/// Aggregation window for "top" statistics.
///
/// Anything other than the three Spotify windows is kept verbatim and sent to
/// the API as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    #[default]
    ShortTerm,
    MediumTerm,
    LongTerm,
    Other(String),
}

impl TimeRange {
    pub fn as_str(&self) -> &str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
            TimeRange::Other(raw) => raw,
        }
    }
}

impl FromStr for TimeRange {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "short_term" => TimeRange::ShortTerm,
            "medium_term" => TimeRange::MediumTerm,
            "long_term" => TimeRange::LongTerm,
            other => TimeRange::Other(other.to_string()),
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Album,
}

impl Track {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }
}

/// Top artists and tracks shown on the dashboard landing view.
#[derive(Debug, Clone)]
pub struct HomeSummary {
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
}

/// One parsed AI suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub song_name: String,
    pub artist_name: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub genres: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub song: String,
    pub artist: String,
}
