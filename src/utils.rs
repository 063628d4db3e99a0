use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{
    Artist, ArtistTableRow, RecommendationRecord, RecommendationTableRow, Track, TrackTableRow,
};

pub(crate) fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the OAuth callback to tie it to this sign-in.
pub fn generate_oauth_state() -> String {
    random_alphanumeric(32)
}

pub fn join_artist_names(track: &Track) -> String {
    track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn artist_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, artist)| ArtistTableRow {
            rank: i + 1,
            name: artist.name.clone(),
            genres: artist
                .genres
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            rank: i + 1,
            name: track.name.clone(),
            artists: join_artist_names(track),
            album: track.album.name.clone(),
        })
        .collect()
}

pub fn recommendation_rows(records: &[RecommendationRecord]) -> Vec<RecommendationTableRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| RecommendationTableRow {
            rank: i + 1,
            song: record.song_name.clone(),
            artist: record.artist_name.clone(),
        })
        .collect()
}

/// Converts 1-based positions picked on the command line into 0-based
/// indices, skipping anything out of range.
pub fn picks_to_indices(picks: &[usize], len: usize) -> Vec<usize> {
    picks
        .iter()
        .filter(|pick| **pick >= 1 && **pick <= len)
        .map(|pick| pick - 1)
        .collect()
}
