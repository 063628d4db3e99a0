use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{server::CallbackState, warning};

const LOGIN_FAILED: &str = "<h4>Login failed.</h4><p>Return to the terminal for details.</p>";

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(callback_state): Extension<CallbackState>,
) -> Html<&'static str> {
    let mut state = callback_state.pkce.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>No sign-in in progress.</h4>");
    };

    if let Some(error) = params.get("error") {
        pkce_state.error = Some(format!("authorization denied: {}", error));
        return Html(LOGIN_FAILED);
    }

    if params.get("state") != Some(&pkce_state.state) {
        pkce_state.error = Some("OAuth state mismatch".to_string());
        return Html(LOGIN_FAILED);
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match callback_state
        .oauth
        .exchange_code_pkce(code, &pkce_state.code_verifier, &pkce_state.redirect_uri)
        .await
    {
        Ok(session) => {
            pkce_state.session = Some(session);
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pkce_state.error = Some(e.to_string());
            Html(LOGIN_FAILED)
        }
    }
}
