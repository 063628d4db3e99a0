//! AI song suggestions.
//!
//! A prompt is built either from seed tracks or from a free-text theme, sent
//! to a [`TextGenerator`], and the reply is parsed line by line into
//! [`RecommendationRecord`]s. Malformed lines are dropped, so a sloppy reply
//! yields a shorter list rather than an error.

mod gemini;
mod parser;

pub use gemini::GeminiClient;
pub use parser::parse_line;
pub use parser::parse_recommendations;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::RecommendationError,
    types::{RecommendationRecord, Track},
};

pub const SEED_SUGGESTION_COUNT: usize = 10;
pub const THEME_SUGGESTION_COUNT: usize = 15;

const FORMAT_INSTRUCTIONS: &str = r#"1. "Song Title" by Artist Name
2. "Song Title" by Artist Name
etc.

Each line should start with a number followed by a period, then the song title in quotes, then "by", then the artist name.
Do not include any other text, explanations, or descriptions. Just the numbered list in the exact format specified."#;

/// Single-turn prompt completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendationError>;
}

/// Prompt asking for [`SEED_SUGGESTION_COUNT`] songs similar to `seeds`.
///
/// Each seed is listed as `N. "title" by artist`, using the first artist or
/// `Unknown Artist` when the track has none.
pub fn seed_prompt(seeds: &[Track]) -> String {
    let songs = seeds
        .iter()
        .enumerate()
        .map(|(i, track)| {
            format!(
                "{}. \"{}\" by {}",
                i + 1,
                track.name,
                track.primary_artist().unwrap_or("Unknown Artist")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on these songs:\n{songs}\n\nPlease recommend {SEED_SUGGESTION_COUNT} similar songs. Use EXACTLY this format for each recommendation:\n{FORMAT_INSTRUCTIONS}"
    )
}

/// Prompt asking for a [`THEME_SUGGESTION_COUNT`] song playlist matching a
/// free-text theme.
pub fn theme_prompt(theme: &str) -> String {
    format!(
        "Create a playlist of {THEME_SUGGESTION_COUNT} songs that match this theme: \"{}\"\n\nPlease use EXACTLY this format for each song:\n{FORMAT_INSTRUCTIONS}",
        theme.trim()
    )
}

#[derive(Clone)]
pub struct Recommender {
    generator: Arc<dyn TextGenerator>,
}

impl Recommender {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Suggests songs similar to the given seed tracks.
    ///
    /// # Arguments
    ///
    /// * `seeds` - Songs picked by the user, usually at most five
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<RecommendationRecord>)` - Parsed suggestions in reply order;
    ///   empty when the reply has no usable lines
    /// - `Err(RecommendationError::EmptyInput)` - `seeds` is empty; the model
    ///   is not called
    /// - `Err(RecommendationError)` - The backend failed; not retried
    pub async fn recommend_from_seeds(
        &self,
        seeds: &[Track],
    ) -> Result<Vec<RecommendationRecord>, RecommendationError> {
        if seeds.is_empty() {
            return Err(RecommendationError::EmptyInput("no seed songs selected"));
        }

        let reply = self.generator.generate(&seed_prompt(seeds)).await?;
        Ok(parse_recommendations(&reply))
    }

    /// Suggests a playlist for a mood or theme.
    ///
    /// # Errors
    ///
    /// [`RecommendationError::EmptyInput`] for a blank theme, otherwise
    /// whatever the backend reports.
    pub async fn suggest_playlist(
        &self,
        theme: &str,
    ) -> Result<Vec<RecommendationRecord>, RecommendationError> {
        if theme.trim().is_empty() {
            return Err(RecommendationError::EmptyInput("playlist theme is blank"));
        }

        let reply = self.generator.generate(&theme_prompt(theme)).await?;
        Ok(parse_recommendations(&reply))
    }
}
