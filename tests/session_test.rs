mod common;

use std::time::Duration;

use riffgrade::management::{LoginStateStore, SessionStore};

use common::token;

#[tokio::test]
async fn test_get_returns_stored_token() {
    let store = SessionStore::new(Duration::from_secs(3600));
    store.create("abc", &token("access-1", 3600)).await;

    assert_eq!(store.get("abc").await.as_deref(), Some("access-1"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unknown_session_is_none() {
    let store = SessionStore::new(Duration::from_secs(3600));
    assert_eq!(store.get("nope").await, None);
    assert_eq!(store.get("").await, None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_overwrites_existing_session() {
    let store = SessionStore::new(Duration::from_secs(3600));
    store.create("abc", &token("first", 3600)).await;
    store.create("abc", &token("second", 3600)).await;

    assert_eq!(store.get("abc").await.as_deref(), Some("second"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = SessionStore::new(Duration::from_secs(3600));
    store.create("abc", &token("access", 3600)).await;

    store.delete("abc").await;
    assert_eq!(store.get("abc").await, None);

    // Deleting again (or something never stored) is a no-op
    store.delete("abc").await;
    store.delete("never-existed").await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_expired_token_reads_as_absent() {
    let store = SessionStore::new(Duration::from_secs(3600));
    store.create("abc", &token("access", 0)).await;

    assert_eq!(store.get("abc").await, None);
    // The expired entry is dropped on read
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_max_ttl_caps_token_lifetime() {
    let store = SessionStore::new(Duration::ZERO);
    store.create("abc", &token("access", 3600)).await;
    assert_eq!(store.get("abc").await, None);
}

#[tokio::test]
async fn test_purge_expired_keeps_live_sessions() {
    let store = SessionStore::new(Duration::from_secs(3600));
    store.create("live", &token("a", 3600)).await;
    store.create("dead", &token("b", 0)).await;

    store.purge_expired().await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("live").await.as_deref(), Some("a"));
}

#[tokio::test]
async fn test_create_drops_expired_sessions() {
    let store = SessionStore::new(Duration::from_secs(3600));
    store.create("dead", &token("b", 0)).await;
    store.create("live", &token("a", 3600)).await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("live").await.as_deref(), Some("a"));
}

#[tokio::test]
async fn test_clones_share_sessions() {
    let store = SessionStore::new(Duration::from_secs(3600));
    let clone = store.clone();
    store.create("abc", &token("access", 3600)).await;

    assert_eq!(clone.get("abc").await.as_deref(), Some("access"));
}

#[tokio::test]
async fn test_concurrent_sessions() {
    let store = SessionStore::new(Duration::from_secs(3600));

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let id = format!("session-{}", i);
                store.create(&id, &token(&format!("token-{}", i), 3600)).await;
                store.get(&id).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let got = handle.await.unwrap();
        assert_eq!(got, Some(format!("token-{}", i)));
    }
    assert_eq!(store.len().await, 32);
}

#[tokio::test]
async fn test_login_state_consumed_once() {
    let logins = LoginStateStore::default();
    let state = logins.issue().await;

    assert!(logins.consume(&state).await);
    // Replaying the same state fails
    assert!(!logins.consume(&state).await);
}

#[tokio::test]
async fn test_login_state_unknown_or_expired() {
    let logins = LoginStateStore::default();
    assert!(!logins.consume("forged").await);

    let short_lived = LoginStateStore::new(Duration::ZERO);
    let state = short_lived.issue().await;
    assert!(!short_lived.consume(&state).await);
}
