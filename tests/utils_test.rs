use spotifyou::types::{
    Album, Artist, Image, RecommendationRecord, TimeRange, Track, TrackArtist,
};
use spotifyou::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str], album: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|name| TrackArtist {
                name: name.to_string(),
            })
            .collect(),
        album: Album {
            name: album.to_string(),
            images: vec![],
        },
    }
}

fn create_test_artist(name: &str, genres: &[&str]) -> Artist {
    Artist {
        id: format!("{}_id", name.to_lowercase()),
        name: name.to_string(),
        images: vec![Image {
            url: "https://i.scdn.co/image/x".to_string(),
            width: Some(640),
            height: Some(640),
        }],
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // base64url without padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
    assert!(!challenge.contains('='));

    // SHA256 is 32 bytes, 43 chars of unpadded base64
    assert_eq!(challenge.len(), 43);
}

#[test]
fn test_generate_code_challenge_rfc7636_vector() {
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_oauth_state() {
    let state = generate_oauth_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_oauth_state());
}

#[test]
fn test_join_artist_names() {
    let solo = create_test_track("1", "Song", &["Solo"], "Album");
    assert_eq!(join_artist_names(&solo), "Solo");

    let collab = create_test_track("2", "Song", &["A", "B", "C"], "Album");
    assert_eq!(join_artist_names(&collab), "A, B, C");

    let nobody = create_test_track("3", "Song", &[], "Album");
    assert_eq!(join_artist_names(&nobody), "");
}

#[test]
fn test_artist_rows_rank_and_genres() {
    let artists = vec![
        create_test_artist("First", &["indie", "rock", "folk", "pop"]),
        create_test_artist("Second", &[]),
    ];

    let rows = artist_rows(&artists);
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].name, "First");
    // only the first three genres are shown
    assert_eq!(rows[0].genres, "indie, rock, folk");

    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].genres, "");
}

#[test]
fn test_track_rows() {
    let tracks = vec![
        create_test_track("1", "Blue", &["Jones"], "Colors"),
        create_test_track("2", "Red", &["Smith", "Lee"], "Heat"),
    ];

    let rows = track_rows(&tracks);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].name, "Red");
    assert_eq!(rows[1].artists, "Smith, Lee");
    assert_eq!(rows[1].album, "Heat");
}

#[test]
fn test_recommendation_rows() {
    let records = vec![RecommendationRecord {
        song_name: "Karma Police".to_string(),
        artist_name: "Radiohead".to_string(),
    }];

    let rows = recommendation_rows(&records);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].song, "Karma Police");
    assert_eq!(rows[0].artist, "Radiohead");
}

#[test]
fn test_picks_to_indices() {
    assert_eq!(picks_to_indices(&[1, 3], 5), vec![0, 2]);

    // 0 and anything past the end are dropped
    assert_eq!(picks_to_indices(&[0, 2, 6], 5), vec![1]);

    // order and duplicates are preserved for the selection to deal with
    assert_eq!(picks_to_indices(&[3, 1, 3], 3), vec![2, 0, 2]);

    assert!(picks_to_indices(&[1], 0).is_empty());
}

#[test]
fn test_time_range_parsing() {
    assert_eq!("short_term".parse::<TimeRange>().unwrap(), TimeRange::ShortTerm);
    assert_eq!("medium_term".parse::<TimeRange>().unwrap(), TimeRange::MediumTerm);
    assert_eq!("long_term".parse::<TimeRange>().unwrap(), TimeRange::LongTerm);

    // unknown values pass through unchanged
    let other = "last_week".parse::<TimeRange>().unwrap();
    assert_eq!(other, TimeRange::Other("last_week".to_string()));
    assert_eq!(other.to_string(), "last_week");

    assert_eq!(TimeRange::default(), TimeRange::ShortTerm);
    assert_eq!(TimeRange::ShortTerm.to_string(), "short_term");
}
