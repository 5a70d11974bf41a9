use axum::{Extension, extract::Query, response::Redirect};
use serde::Deserialize;
use tracing::info;

use crate::{error::AppError, server::AppState, utils};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Completes the OAuth flow: verifies `state`, exchanges the code and opens a session.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Result<Redirect, AppError> {
    let Some(login_state) = params.state.as_deref() else {
        return Err(AppError::InvalidLoginState);
    };
    if !state.logins.consume(login_state).await {
        return Err(AppError::InvalidLoginState);
    }

    if let Some(error) = params.error {
        return Err(AppError::AuthorizationDenied(error));
    }
    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return Err(AppError::AuthorizationDenied(
            "no authorization code received".to_string(),
        ));
    };

    let token = state.auth.exchange_code(code).await?;

    let session_id = utils::generate_token();
    state.sessions.create(&session_id, &token).await;
    info!(
        expires_in = token.expires_in,
        scope = %token.scope,
        "session created"
    );

    Ok(Redirect::to(&format!("/analyze?session_id={}", session_id)))
}
