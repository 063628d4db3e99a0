use std::sync::LazyLock;

use regex::Regex;

use crate::types::RecommendationRecord;

// N. "Song Title" by Artist Name, ASCII ordinal at the very start of the line
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[0-9]+\.\s*"(.+)"\s*by\s*(.+)$"#).expect("recommendation line pattern is valid")
});

/// Parses one line of model output.
///
/// Returns `None` for anything that is not a numbered `"title" by artist`
/// entry. The ordinal must open the line, so indented entries are rejected;
/// trailing whitespace only ends up in the artist group, which is trimmed.
/// Ordinals are not checked for sequence.
pub fn parse_line(line: &str) -> Option<RecommendationRecord> {
    let captures = LINE_PATTERN.captures(line)?;
    Some(RecommendationRecord {
        song_name: captures.get(1)?.as_str().trim().to_string(),
        artist_name: captures.get(2)?.as_str().trim().to_string(),
    })
}

/// Parses a whole reply, keeping matching lines in their original order and
/// silently dropping the rest.
pub fn parse_recommendations(text: &str) -> Vec<RecommendationRecord> {
    text.lines().filter_map(parse_line).collect()
}
