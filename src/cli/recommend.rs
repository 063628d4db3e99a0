use tabled::Table;

use crate::{
    app::App,
    cli, error, info,
    selection::{MAX_SELECTED_SONGS, SongSelection},
    success,
    types::{RecommendationRecord, TimeRange},
    utils, warning,
};

/// How many recent top tracks are offered as seeds.
const SEED_CANDIDATES: u32 = 20;

pub async fn recommend(app: &App, picks: Vec<usize>) {
    cli::require_session(&app.session, "recommend").await;

    let recommender = match app.recommender() {
        Ok(r) => r,
        Err(e) => error!("Cannot get recommendations. Err: {}", e),
    };

    let pb = cli::spinner("Loading your top songs...");
    let result = app
        .catalog
        .top_tracks(&TimeRange::ShortTerm, SEED_CANDIDATES)
        .await;
    pb.finish_and_clear();

    let candidates = match result {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to fetch your top songs. Err: {}", e),
    };

    if picks.is_empty() {
        println!("{}", Table::new(utils::track_rows(&candidates)));
        info!(
            "Select up to {} songs with --pick <#>, e.g. spotifyou recommend --pick 1 --pick 3",
            MAX_SELECTED_SONGS
        );
        return;
    }

    let in_range = utils::picks_to_indices(&picks, candidates.len());
    if in_range.len() != picks.len() {
        warning!(
            "Ignoring picks outside 1..={} (your recent top songs).",
            candidates.len()
        );
    }

    let mut selection = SongSelection::new();
    for index in in_range {
        let track = candidates[index].clone();
        let name = track.name.clone();
        if !selection.select(track) {
            if selection.is_full() {
                warning!(
                    "Only {} songs can be selected, skipping {}.",
                    MAX_SELECTED_SONGS,
                    name
                );
            } else {
                warning!("{} is already selected.", name);
            }
        }
    }

    if selection.is_empty() {
        error!("No songs selected.");
    }

    for track in selection.tracks() {
        info!("Seed: \"{}\" by {}", track.name, utils::join_artist_names(track));
    }

    let pb = cli::spinner("Getting AI recommendations...");
    let result = recommender.recommend_from_seeds(selection.tracks()).await;
    pb.finish_and_clear();

    match result {
        Ok(records) => print_records("AI Recommendations", &records),
        Err(e) => error!("Failed to get recommendations. Please try again. Err: {}", e),
    }
}

pub async fn playlist(app: &App, theme: String) {
    cli::require_session(&app.session, "playlist").await;

    if theme.trim().is_empty() {
        error!("Enter a theme or mood for your playlist, e.g. \"Chill study music\".");
    }

    let recommender = match app.recommender() {
        Ok(r) => r,
        Err(e) => error!("Cannot get playlist suggestions. Err: {}", e),
    };

    let pb = cli::spinner("Getting AI playlist suggestions...");
    let result = recommender.suggest_playlist(&theme).await;
    pb.finish_and_clear();

    match result {
        Ok(records) => print_records("Suggested Playlist", &records),
        Err(e) => error!(
            "Failed to get playlist suggestions. Please try again. Err: {}",
            e
        ),
    }
}

fn print_records(title: &str, records: &[RecommendationRecord]) {
    if records.is_empty() {
        warning!("The AI reply contained no usable suggestions. Please try again.");
        return;
    }

    success!("{} ({} songs)", title, records.len());
    println!("{}", Table::new(utils::recommendation_rows(records)));
}
