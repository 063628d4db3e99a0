mod common;

use std::{sync::Arc, time::Duration};

use spotifyou::{
    error::AuthError,
    management::SessionStore,
    session::SessionProvider,
    types::{Session, Token},
};
use tokio::sync::mpsc;

use common::{FakeIdentity, expired_session, provider_with, valid_session};

#[tokio::test]
async fn test_access_token_without_session() {
    let (provider, _) = provider_with(None);

    let result = provider.get_access_token().await;
    assert!(matches!(result, Err(AuthError::NoSession)));
}

#[tokio::test]
async fn test_access_token_with_valid_session() {
    let (provider, _) = provider_with(Some(valid_session("abc")));
    assert_eq!(provider.get_access_token().await.unwrap(), "abc");
}

#[tokio::test]
async fn test_expired_session_has_no_token() {
    let (provider, _) = provider_with(Some(expired_session("old")));

    // the session is still reported, but cannot be used
    assert!(provider.get_session().await.is_some());
    assert!(matches!(
        provider.get_access_token().await,
        Err(AuthError::NoSession)
    ));
}

#[tokio::test]
async fn test_backend_failure_reads_as_no_session() {
    let provider = SessionProvider::new(Arc::new(FakeIdentity::failing()));

    assert_eq!(provider.get_session().await, None);
    assert!(matches!(
        provider.get_access_token().await,
        Err(AuthError::NoSession)
    ));
}

#[tokio::test]
async fn test_token_is_read_fresh_each_time() {
    let (provider, backend) = provider_with(Some(valid_session("one")));
    assert_eq!(provider.get_access_token().await.unwrap(), "one");

    backend.set_session(Some(valid_session("two")));
    assert_eq!(provider.get_access_token().await.unwrap(), "two");
}

#[tokio::test]
async fn test_sign_in_and_sign_out() {
    let (provider, _) = provider_with(None);

    let session = provider
        .sign_in("user-top-read", "http://127.0.0.1:8888/callback")
        .await
        .unwrap();
    assert_eq!(provider.get_access_token().await.unwrap(), session.access_token);

    provider.sign_out().await.unwrap();
    assert_eq!(provider.get_session().await, None);
}

#[tokio::test]
async fn test_on_change_delivers_updates() {
    let (provider, backend) = provider_with(None);
    let (tx, mut rx) = mpsc::unbounded_channel::<Option<Session>>();

    let _subscription = provider.on_change(move |session| {
        let _ = tx.send(session);
    });

    backend.set_session(Some(valid_session("fresh")));
    let got = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("listener was not called")
        .unwrap();
    assert_eq!(got.map(|s| s.access_token), Some("fresh".to_string()));

    backend.set_session(None);
    let got = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("listener was not called")
        .unwrap();
    assert_eq!(got, None);
}

#[tokio::test]
async fn test_dropping_subscription_stops_updates() {
    let (provider, backend) = provider_with(None);
    let (tx, mut rx) = mpsc::unbounded_channel::<Option<Session>>();

    let subscription = provider.on_change(move |session| {
        let _ = tx.send(session);
    });
    subscription.unsubscribe();

    backend.set_session(Some(valid_session("ignored")));

    // the listener (and its sender) is gone, so the channel closes empty
    let got = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("channel did not close");
    assert_eq!(got, None);
}

#[tokio::test]
async fn test_session_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("nested/session.json"));

    assert_eq!(store.load().await.unwrap(), None);

    let session = valid_session("persisted");
    store.persist(&session).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(session));

    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);

    // clearing twice is fine
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_session_store_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let store = SessionStore::new(path);
    assert!(matches!(store.load().await, Err(AuthError::Store { .. })));
}

#[test]
fn test_session_refresh_window() {
    let mut session = valid_session("t");
    assert!(session.is_valid());
    assert!(!session.needs_refresh());

    // inside the four minute margin
    session.expires_at = chrono::Utc::now() + chrono::Duration::minutes(3);
    assert!(session.is_valid());
    assert!(session.needs_refresh());

    session.expires_at = chrono::Utc::now() - chrono::Duration::seconds(1);
    assert!(!session.is_valid());
    assert!(session.needs_refresh());
}

fn token(expires_in: i64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: None,
        scope: "user-top-read".to_string(),
        expires_in,
    }
}

#[test]
fn test_session_from_token() {
    let now = chrono::Utc::now();
    let session = Session::from_token(token(3600), now).unwrap();
    assert_eq!(session.expires_at, now + chrono::Duration::seconds(3600));
    assert_eq!(session.access_token, "access");
}

#[test]
fn test_session_from_token_rejects_absurd_expiry() {
    let now = chrono::Utc::now();

    for expires_in in [i64::MAX, i64::MIN, 400_000_000_000_000] {
        assert!(
            matches!(
                Session::from_token(token(expires_in), now),
                Err(AuthError::TokenRequest(_))
            ),
            "expires_in {} should be rejected",
            expires_in
        );
    }
}
