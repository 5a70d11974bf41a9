//! Shared fakes for the integration tests.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use riffgrade::{
    classifier::LlmClassifier,
    config::Settings,
    error::{AuthError, SpotifyError},
    llm::{CompletionOptions, LlmError, LlmProvider, ModelInfo},
    management::{LoginStateStore, SessionStore},
    server::AppState,
    spotify::{AuthProvider, TrackSource},
    types::{AudioFeatures, Token, TrackQuery, TrackSummary},
};

pub const FAKE_AUTHORIZE_URL: &str = "https://accounts.example.test/authorize";

pub fn token(access_token: &str, expires_in: u64) -> Token {
    Token {
        access_token: access_token.to_string(),
        scope: "user-top-read".to_string(),
        expires_in,
    }
}

pub fn summary(name: &str, artist: &str, tempo: f64) -> TrackSummary {
    TrackSummary::new(
        name,
        artist,
        AudioFeatures {
            tempo,
            ..AudioFeatures::default()
        },
    )
}

/// Settings pointing every upstream at `base`.
pub fn settings_for(base: &str) -> Settings {
    let mut vars = HashMap::new();
    vars.insert("SPOTIFY_API_AUTH_CLIENT_ID", "client-id".to_string());
    vars.insert("SPOTIFY_API_AUTH_CLIENT_SECRET", "secret".to_string());
    vars.insert(
        "SPOTIFY_API_REDIRECT_URI",
        "http://127.0.0.1:8080/callback".to_string(),
    );
    vars.insert("SPOTIFY_API_AUTH_URL", format!("{}/authorize", base));
    vars.insert("SPOTIFY_API_TOKEN_URL", format!("{}/api/token", base));
    vars.insert("SPOTIFY_API_URL", base.to_string());
    vars.insert("GEMINI_API_KEY", "key".to_string());
    vars.insert("GEMINI_API_URL", base.to_string());
    vars.insert("GEMINI_MODEL", "test-model".to_string());
    vars.insert("HTTP_TIMEOUT_SECS", "2".to_string());
    Settings::from_lookup(|k| vars.get(k).cloned()).expect("test settings are valid")
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{}", addr)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[derive(Default)]
pub struct FakeAuth {
    pub calls: AtomicUsize,
    pub fail: bool,
}

#[async_trait]
impl AuthProvider for FakeAuth {
    fn authorize_url(&self, state: &str) -> String {
        format!("{}?state={}", FAKE_AUTHORIZE_URL, state)
    }

    async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AuthError::Status {
                status: 400,
                body: "invalid_grant".to_string(),
            });
        }
        Ok(token(&format!("token-for-{}", code), 3600))
    }
}

#[derive(Default)]
pub struct FakeTracks {
    pub calls: AtomicUsize,
    pub tracks: Vec<TrackSummary>,
    pub fail: bool,
    pub seen: Mutex<Vec<(String, TrackQuery)>>,
}

impl FakeTracks {
    pub fn with(tracks: Vec<TrackSummary>) -> Self {
        FakeTracks {
            tracks,
            ..FakeTracks::default()
        }
    }
}

#[async_trait]
impl TrackSource for FakeTracks {
    async fn fetch_tracks(
        &self,
        access_token: &str,
        query: &TrackQuery,
    ) -> Result<Vec<TrackSummary>, SpotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((access_token.to_string(), *query));
        if self.fail {
            return Err(SpotifyError::Status {
                status: 500,
                body: "upstream down".to_string(),
            });
        }
        Ok(self.tracks.clone())
    }
}

pub struct FakeLlm {
    pub calls: AtomicUsize,
    pub response: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn answering(text: &str) -> Self {
        FakeLlm {
            calls: AtomicUsize::new(0),
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        FakeLlm {
            calls: AtomicUsize::new(0),
            response: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, prompt: &str, _options: &CompletionOptions) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().map_err(LlmError::Connection)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        Ok(vec![
            ModelInfo {
                name: "models/fake-model".to_string(),
                display_name: "Fake".to_string(),
                description: String::new(),
                supported_methods: vec!["generateContent".to_string()],
            },
            ModelInfo {
                name: "models/embedder".to_string(),
                display_name: "Embedder".to_string(),
                description: String::new(),
                supported_methods: vec!["embedContent".to_string()],
            },
        ])
    }
}

pub struct Harness {
    pub state: AppState,
    pub auth: Arc<FakeAuth>,
    pub tracks: Arc<FakeTracks>,
    pub llm: Arc<FakeLlm>,
}

impl Harness {
    pub fn new(auth: FakeAuth, tracks: FakeTracks, llm: FakeLlm) -> Self {
        let auth = Arc::new(auth);
        let tracks = Arc::new(tracks);
        let llm = Arc::new(llm);

        let state = AppState {
            sessions: SessionStore::new(Duration::from_secs(3600)),
            logins: LoginStateStore::default(),
            auth: auth.clone(),
            tracks: tracks.clone(),
            classifier: Arc::new(LlmClassifier::new(llm.clone(), CompletionOptions::default())),
            llm: llm.clone(),
            track_limit: 20,
        };

        Harness {
            state,
            auth,
            tracks,
            llm,
        }
    }

    pub fn router(&self) -> Router {
        riffgrade::server::build_router(self.state.clone())
    }

    pub fn outbound_calls(&self) -> usize {
        self.auth.calls.load(Ordering::SeqCst)
            + self.tracks.calls.load(Ordering::SeqCst)
            + self.llm.calls.load(Ordering::SeqCst)
    }
}
