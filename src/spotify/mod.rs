//! # Spotify Integration Module
//!
//! Client for the two Spotify services riffgrade talks to:
//!
//! ```text
//! Handlers (api)
//!      ↓
//! AuthProvider / TrackSource traits
//!      ↓
//! SpotifyClient (reqwest, JSON)
//!      ↓
//! accounts.spotify.com  |  api.spotify.com/v1
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the authorization code flow with a client secret:
//! building the authorize URL for `/login` and exchanging the code received
//! on `/callback` for a bearer token. A failed exchange is reported once and
//! never retried.
//!
//! ## Tracks
//!
//! [`tracks`] fetches the user's top or recently played tracks and enriches
//! each with audio features. Feature lookups are independent of each other and
//! of the track listing: a lookup that fails for any reason is replaced by an
//! estimate derived from the track's popularity, so one restricted track never
//! blocks the batch.
//!
//! ## Seams
//!
//! Handlers only see the [`AuthProvider`] and [`TrackSource`] traits, so tests
//! can swap in fakes and count calls.

pub mod auth;
pub mod tracks;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::Settings,
    error::{AuthError, SpotifyError},
    types::{Token, TrackQuery, TrackSummary},
};

pub use tracks::fallback_features;

/// Scopes requested on `/login`.
pub const SPOTIFY_SCOPES: &str = "user-top-read user-read-recently-played";

/// OAuth side of Spotify.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authorization URL the user is redirected to, carrying `state`.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for a bearer token.
    async fn exchange_code(&self, code: &str) -> Result<Token, AuthError>;
}

/// Source of the tracks to classify.
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Fetches tracks with their audio features, in provider order.
    ///
    /// Only the listing call can fail; per-track feature failures are
    /// replaced by [`fallback_features`].
    async fn fetch_tracks(
        &self,
        access_token: &str,
        query: &TrackQuery,
    ) -> Result<Vec<TrackSummary>, SpotifyError>;
}

/// HTTP client for the Spotify accounts service and Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.http_timeout).build()?;
        let spotify = &settings.spotify;

        Ok(SpotifyClient {
            client,
            client_id: spotify.client_id.clone(),
            client_secret: spotify.client_secret.clone(),
            redirect_uri: spotify.redirect_uri.clone(),
            auth_url: spotify.auth_url.clone(),
            token_url: spotify.token_url.clone(),
            api_url: spotify.api_url.clone(),
        })
    }
}
