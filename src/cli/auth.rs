use crate::{app::App, error, info, success, warning};

pub async fn auth(app: &App) {
    if let Some(session) = app.session.get_session().await {
        if session.is_valid() {
            info!("Already signed in, starting a fresh sign-in anyway.");
        }
    }

    info!("Waiting for Spotify authorization in your browser...");
    match app
        .session
        .sign_in(&app.settings.spotify.scope, &app.settings.spotify.redirect_uri)
        .await
    {
        Ok(session) => success!(
            "Authentication successful! Session valid until {}.",
            session.expires_at.format("%Y-%m-%d %H:%M UTC")
        ),
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}

pub async fn logout(app: &App) {
    match app.session.sign_out().await {
        Ok(()) => success!("Signed out."),
        Err(e) => warning!("Error during logout: {}", e),
    }
}
