use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::{
    Res, api,
    classifier::{DifficultyClassifier, LlmClassifier},
    config::Settings,
    info,
    llm::{CompletionOptions, GeminiProvider, LlmProvider},
    management::{LoginStateStore, SessionStore},
    spotify::{AuthProvider, SpotifyClient, TrackSource},
    warning,
};

/// Collaborators shared by every handler.
///
/// Built once at startup and handed to the router as an extension; clones
/// share the same stores and clients.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub logins: LoginStateStore,
    pub auth: Arc<dyn AuthProvider>,
    pub tracks: Arc<dyn TrackSource>,
    pub classifier: Arc<dyn DifficultyClassifier>,
    pub llm: Arc<dyn LlmProvider>,
    pub track_limit: u32,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let spotify = Arc::new(SpotifyClient::new(settings)?);
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_settings(&settings.gemini));
        let options = CompletionOptions {
            timeout: settings.gemini.timeout,
            ..CompletionOptions::default()
        };

        Ok(AppState {
            sessions: SessionStore::new(settings.session_ttl),
            logins: LoginStateStore::default(),
            auth: spotify.clone(),
            tracks: spotify,
            classifier: Arc::new(LlmClassifier::new(llm.clone(), options)),
            llm,
            track_limit: settings.track_limit,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/analyze", get(api::analyze))
        .route("/health", get(api::health))
        .route("/debug/models", get(api::list_models))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// Binds `settings.server_address` and serves until Ctrl-C.
///
/// With `open_browser` set, the landing page is opened once the listener is bound.
pub async fn start_api_server(settings: Settings, open_browser: bool) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_address)
        .map_err(|e| format!("Failed to parse server address '{}': {}", settings.server_address, e))?;

    let state = AppState::from_settings(&settings)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let url = format!("http://{}/", listener.local_addr()?);
    info!("Listening on {}", url);

    if open_browser && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
