use crate::types::Track;

pub const MAX_SELECTED_SONGS: usize = 5;

/// Seed songs picked for a recommendation request.
///
/// Keeps insertion order, ignores duplicates by track id and never grows past
/// [`MAX_SELECTED_SONGS`].
#[derive(Debug, Clone, Default)]
pub struct SongSelection {
    tracks: Vec<Track>,
}

impl SongSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the track. Returns `false` if the selection is full or already
    /// holds a track with the same id.
    pub fn select(&mut self, track: Track) -> bool {
        if self.is_full() || self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    pub fn remove(&mut self, track_id: &str) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != track_id);
        self.tracks.len() != before
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    pub fn is_full(&self) -> bool {
        self.tracks.len() >= MAX_SELECTED_SONGS
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
