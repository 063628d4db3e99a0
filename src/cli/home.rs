use colored::Colorize;
use tabled::Table;

use crate::{app::App, cli, error, utils};

/// Number of entries shown per section.
const PREVIEW_LEN: usize = 5;

pub async fn home(app: &App) {
    cli::require_session(&app.session, "home").await;

    let pb = cli::spinner("Loading your dashboard...");
    let result = app.catalog.home_summary().await;
    pb.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => error!("Error fetching data: {}", e),
    };

    println!("{}", "Your Top Artists".bold());
    let artists = &summary.artists[..summary.artists.len().min(PREVIEW_LEN)];
    println!("{}", Table::new(utils::artist_rows(artists)));
    println!("  See all: spotifyou artists --time-range short_term\n");

    println!("{}", "Your Top Tracks".bold());
    let tracks = &summary.tracks[..summary.tracks.len().min(PREVIEW_LEN)];
    println!("{}", Table::new(utils::track_rows(tracks)));
    println!("  See all: spotifyou tracks --time-range short_term\n");

    println!("{}", "AI Recommendations".bold());
    println!("  Try it now: spotifyou recommend --pick 1 --pick 2");
}
