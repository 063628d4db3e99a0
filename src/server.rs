use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, error::AuthError, spotify::auth::OAuthClient, types::PkceState};

/// State shared between a pending sign-in and the callback handler.
#[derive(Clone)]
pub struct CallbackState {
    pub pkce: Arc<Mutex<Option<PkceState>>>,
    pub oauth: OAuthClient,
}

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

pub async fn bind(addr: &str) -> Result<TcpListener, AuthError> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| AuthError::Server(format!("failed to parse server address {}: {}", addr, e)))?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| AuthError::Server(format!("failed to bind {}: {}", addr, e)))
}

pub async fn serve(listener: TcpListener, state: CallbackState) -> Result<(), AuthError> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| AuthError::Server(e.to_string()))
}
