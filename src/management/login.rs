use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::utils;

/// How long a `state` issued by `/login` stays redeemable.
pub const LOGIN_STATE_TTL: Duration = Duration::from_secs(600);

/// Anti-forgery `state` values handed out on `/login` and redeemed on `/callback`.
#[derive(Debug, Clone)]
pub struct LoginStateStore {
    pending: Arc<Mutex<HashMap<String, i64>>>,
    ttl: Duration,
}

impl Default for LoginStateStore {
    fn default() -> Self {
        Self::new(LOGIN_STATE_TTL)
    }
}

impl LoginStateStore {
    pub fn new(ttl: Duration) -> Self {
        LoginStateStore {
            pending: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Generates a fresh state value and remembers it.
    pub async fn issue(&self) -> String {
        let now = Utc::now().timestamp();
        let state = utils::generate_token();

        let mut pending = self.pending.lock().await;
        pending.retain(|_, expires_at| *expires_at > now);
        pending.insert(state.clone(), now.saturating_add(self.ttl.as_secs() as i64));
        state
    }

    /// Redeems `state`. True only once per issued, unexpired value.
    pub async fn consume(&self, state: &str) -> bool {
        let now = Utc::now().timestamp();
        match self.pending.lock().await.remove(state) {
            Some(expires_at) => expires_at > now,
            None => false,
        }
    }
}
