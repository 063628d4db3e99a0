use tabled::Table;

use crate::{app::App, cli, error, types::TimeRange, utils, warning};

pub async fn artists(app: &App, time_range: TimeRange, limit: u32, refresh: bool) {
    cli::require_session(&app.session, "artists").await;

    let pb = cli::spinner(&format!("Fetching top artists ({})...", time_range));
    let result = if refresh {
        app.catalog.refresh_top_artists(&time_range, limit).await
    } else {
        app.catalog.top_artists(&time_range, limit).await
    };
    pb.finish_and_clear();

    match result {
        Ok(artists) if artists.is_empty() => warning!("No top artists for {} yet.", time_range),
        Ok(artists) => println!("{}", Table::new(utils::artist_rows(&artists))),
        Err(e) => error!("Failed to fetch your top artists. Err: {}", e),
    }
}

pub async fn tracks(app: &App, time_range: TimeRange, limit: u32, refresh: bool) {
    cli::require_session(&app.session, "tracks").await;

    let pb = cli::spinner(&format!("Fetching top tracks ({})...", time_range));
    let result = if refresh {
        app.catalog.refresh_top_tracks(&time_range, limit).await
    } else {
        app.catalog.top_tracks(&time_range, limit).await
    };
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => warning!("No top tracks for {} yet.", time_range),
        Ok(tracks) => println!("{}", Table::new(utils::track_rows(&tracks))),
        Err(e) => error!("Failed to fetch your top tracks. Err: {}", e),
    }
}
