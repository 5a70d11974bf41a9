use axum::{Extension, response::Redirect};
use tracing::debug;

use crate::server::AppState;

/// Sends the browser to Spotify's consent screen with a fresh anti-forgery state.
pub async fn login(Extension(state): Extension<AppState>) -> Redirect {
    let login_state = state.logins.issue().await;
    let url = state.auth.authorize_url(&login_state);
    debug!("redirecting to Spotify authorization");
    Redirect::to(&url)
}
