//! Error types that reach the HTTP boundary.
//!
//! Soft failures (a single track's audio features, the model call) never show
//! up here: they are absorbed where they happen. Everything in [`AppError`]
//! aborts the request with an explicit status.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::render;

/// Failure talking to the Spotify accounts service.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("token response is missing `{0}`")]
    MissingField(&'static str),
}

/// Failure talking to the Spotify Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Spotify API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid session")]
    Unauthenticated,

    #[error("Invalid login state")]
    InvalidLoginState,

    #[error("Authorization was not granted: {0}")]
    AuthorizationDenied(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(#[from] AuthError),

    #[error("Failed to fetch tracks: {0}")]
    Upstream(#[from] SpotifyError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidLoginState
            | AppError::AuthorizationDenied(_)
            | AppError::AuthFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Html(render::render_error(status, &self.to_string()))).into_response()
    }
}
