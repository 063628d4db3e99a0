#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tokio::sync::watch;

use spotifyou::{
    error::AuthError,
    session::{IdentityBackend, SessionProvider, SignInOptions},
    types::{Album, Session, Track, TrackArtist},
};

pub fn valid_session(token: &str) -> Session {
    Session {
        access_token: token.to_string(),
        refresh_token: Some("refresh-me".to_string()),
        scope: "user-read-email user-top-read".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

pub fn expired_session(token: &str) -> Session {
    Session {
        expires_at: Utc::now() - Duration::minutes(5),
        ..valid_session(token)
    }
}

pub fn track(id: &str, name: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![TrackArtist {
            name: artist.to_string(),
        }],
        album: Album {
            name: format!("{} (Album)", name),
            images: Vec::new(),
        },
    }
}

/// In-memory identity backend.
pub struct FakeIdentity {
    session: Mutex<Option<Session>>,
    fail: bool,
    pub calls: AtomicUsize,
    changes: watch::Sender<Option<Session>>,
}

impl FakeIdentity {
    pub fn with_session(session: Option<Session>) -> Self {
        Self {
            session: Mutex::new(session),
            fail: false,
            calls: AtomicUsize::new(0),
            changes: watch::Sender::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_session(None)
        }
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session.clone();
        self.changes.send_replace(session);
    }
}

#[async_trait]
impl IdentityBackend for FakeIdentity {
    async fn sign_in_with_oauth(&self, options: &SignInOptions) -> Result<Session, AuthError> {
        if options.provider != "spotify" {
            return Err(AuthError::UnsupportedProvider(options.provider.clone()));
        }
        let session = valid_session("signed-in");
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AuthError::TokenRequest("backend unavailable".to_string()));
        }
        Ok(self.session.lock().unwrap().clone())
    }

    fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_session(None);
        Ok(())
    }
}

pub fn provider_with(session: Option<Session>) -> (SessionProvider, Arc<FakeIdentity>) {
    let backend = Arc::new(FakeIdentity::with_session(session));
    (SessionProvider::new(backend.clone()), backend)
}

/// Stand-in for the Spotify Web API `/me/top/*` endpoints.
#[derive(Clone, Default)]
pub struct MockSpotify {
    pub hits: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<(String, HashMap<String, String>, Option<String>)>>>,
    pub fail_with: Option<u16>,
}

impl MockSpotify {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, HashMap<String, String>, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    state: &MockSpotify,
    path: &str,
    query: HashMap<String, String>,
    headers: &HeaderMap,
) -> Option<Response> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .unwrap()
        .push((path.to_string(), query, auth));

    state.fail_with.map(|code| {
        let status = StatusCode::from_u16(code).unwrap();
        (status, Json(json!({ "error": { "status": code, "message": "mock failure" } })))
            .into_response()
    })
}

async fn top_artists(
    State(state): State<MockSpotify>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = record(&state, "/me/top/artists", query, &headers).await {
        return failure;
    }
    Json(json!({
        "items": [
            { "id": "a1", "name": "Jones", "images": [{ "url": "https://img/a1", "width": 640, "height": 640 }], "genres": ["indie", "folk"] },
            { "id": "a2", "name": "Smith", "images": [], "genres": [] }
        ],
        "total": 2
    }))
    .into_response()
}

async fn top_tracks(
    State(state): State<MockSpotify>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = record(&state, "/me/top/tracks", query, &headers).await {
        return failure;
    }
    Json(json!({
        "items": [
            { "id": "t1", "name": "Blue", "artists": [{ "name": "Jones" }], "album": { "name": "Colors", "images": [] } },
            { "id": "t2", "name": "Red", "artists": [{ "name": "Smith" }, { "name": "Lee" }], "album": { "name": "Colors", "images": [] } }
        ]
    }))
    .into_response()
}

/// Starts the mock on an ephemeral port and returns its base URL.
pub async fn spawn_mock_spotify(state: MockSpotify) -> String {
    let app = Router::new()
        .route("/me/top/artists", get(top_artists))
        .route("/me/top/tracks", get(top_tracks))
        .with_state(state);
    spawn_router(app).await
}

pub async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
