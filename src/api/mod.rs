//! # API Module
//!
//! HTTP handlers for the riffgrade web surface.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`, landing page with the login link
//! - [`login`] - `GET /login`, redirect to Spotify's authorization screen
//! - [`callback`] - `GET /callback`, OAuth callback; creates the session
//! - [`analyze`] - `GET /analyze`, the tracks → classifier → page pipeline
//! - [`health`] - `GET /health`, status and version
//! - [`list_models`] - `GET /debug/models`, models available to the API key
//!
//! Handlers receive their collaborators through the shared
//! [`AppState`](crate::server::AppState) extension and report boundary
//! failures as [`AppError`](crate::error::AppError).

mod analyze;
mod callback;
mod health;
mod home;
mod login;
mod models;

pub use analyze::{AnalyzeParams, analyze};
pub use callback::{CallbackParams, callback};
pub use health::health;
pub use home::home;
pub use login::login;
pub use models::list_models;
