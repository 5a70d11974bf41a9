use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::types::Token;

#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    expires_at: i64,
}

impl Session {
    fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// In-memory map from session id to Spotify access token.
///
/// Cheap to clone; clones share the same map. A session lives until
/// `min(token.expires_in, max_ttl)` has passed, after which it reads as absent.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    max_ttl: Duration,
}

impl SessionStore {
    pub fn new(max_ttl: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_ttl,
        }
    }

    /// Stores the token under `id`, replacing any previous session.
    pub async fn create(&self, id: &str, token: &Token) {
        let now = Utc::now().timestamp();
        let ttl = self.max_ttl.as_secs().min(token.expires_in);
        let session = Session {
            access_token: token.access_token.clone(),
            expires_at: now.saturating_add(ttl as i64),
        };

        self.purge_expired().await;
        self.sessions.write().await.insert(id.to_string(), session);
    }

    /// Returns the access token for `id`, or `None` if unknown or expired.
    pub async fn get(&self, id: &str) -> Option<String> {
        let now = Utc::now().timestamp();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                Some(session) if !session.is_expired(now) => {
                    return Some(session.access_token.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // expired: drop it, re-checking under the write lock in case it was replaced
        let mut sessions = self.sessions.write().await;
        if sessions.get(id).is_some_and(|s| s.is_expired(now)) {
            sessions.remove(id);
        }
        None
    }

    pub async fn delete(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    /// Drops every expired session. Runs on each [`create`](Self::create).
    pub async fn purge_expired(&self) {
        let now = Utc::now().timestamp();
        self.sessions.write().await.retain(|_, s| !s.is_expired(now));
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
